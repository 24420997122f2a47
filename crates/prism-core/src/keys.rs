use std::fmt;

use crate::preset::ShaderPreset;
use crate::workspace::LayoutPreset;

/// Modifier masks, matching the persisted config format.
pub const MOD_ALT: u32 = 1;
pub const MOD_CTRL: u32 = 2;
pub const MOD_SHIFT: u32 = 4;

/// Virtual key codes ('A'..'Z' and '0'..'9' are their ASCII values).
pub const VK_ESCAPE: u32 = 0x1B;
pub const VK_SPACE: u32 = 0x20;
pub const VK_F1: u32 = 0x70;
pub const VK_F5: u32 = 0x74;
pub const VK_F9: u32 = 0x78;
pub const VK_F12: u32 = 0x7B;

/// A key combination claimed by a built-in command. These always win
/// against user bindings and are checked first.
pub struct ReservedShortcut {
    pub key: u32,
    pub modifiers: u32,
    pub action: &'static str,
}

pub const RESERVED_SHORTCUTS: &[ReservedShortcut] = &[
    ReservedShortcut {
        key: VK_SPACE,
        modifiers: 0,
        action: "Toggle playback",
    },
    ReservedShortcut {
        key: VK_ESCAPE,
        modifiers: 0,
        action: "Clear active effect",
    },
    ReservedShortcut {
        key: VK_F5,
        modifiers: 0,
        action: "Compile current shader",
    },
    ReservedShortcut {
        key: VK_F9,
        modifiers: 0,
        action: "Start/stop recording",
    },
    ReservedShortcut {
        key: b'O' as u32,
        modifiers: MOD_CTRL,
        action: "Open video",
    },
    ReservedShortcut {
        key: b'S' as u32,
        modifiers: MOD_CTRL,
        action: "Save current shader",
    },
];

/// What a candidate binding collided with. `Display` renders a message
/// ready for the binding dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    Reserved { action: &'static str },
    Preset { index: usize, name: String },
    Layout { index: usize, name: String },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Reserved { action } => write!(f, "Reserved shortcut: {action}"),
            Conflict::Preset { name, .. } => write!(f, "Already bound to shader '{name}'"),
            Conflict::Layout { name, .. } => write!(f, "Already bound to layout '{name}'"),
        }
    }
}

/// Check a candidate binding against the reserved table, then presets,
/// then layouts, returning the first hit in that order.
///
/// `exclude_preset`/`exclude_layout` name the entry currently being
/// rebound so it never conflicts with itself. Matching is exact on the
/// modifier mask: plain `F` and `Ctrl+F` are distinct bindings that
/// coexist. Key 0 means "unbound" and conflicts with nothing.
pub fn find_conflict(
    key: u32,
    modifiers: u32,
    presets: &[ShaderPreset],
    exclude_preset: Option<usize>,
    layouts: &[LayoutPreset],
    exclude_layout: Option<usize>,
) -> Option<Conflict> {
    if key == 0 {
        return None;
    }

    for reserved in RESERVED_SHORTCUTS {
        if reserved.key == key && reserved.modifiers == modifiers {
            return Some(Conflict::Reserved {
                action: reserved.action,
            });
        }
    }

    for (index, preset) in presets.iter().enumerate() {
        if exclude_preset == Some(index) {
            continue;
        }
        if preset.key_code == key && preset.key_modifiers == modifiers {
            return Some(Conflict::Preset {
                index,
                name: preset.name.clone(),
            });
        }
    }

    for (index, layout) in layouts.iter().enumerate() {
        if exclude_layout == Some(index) {
            continue;
        }
        if layout.key_code == key && layout.key_modifiers == modifiers {
            return Some(Conflict::Layout {
                index,
                name: layout.name.clone(),
            });
        }
    }

    None
}

/// Dispatch-time modifier test: every required modifier must be held,
/// extra held modifiers are ignored. Looser than the conflict check on
/// purpose — Ctrl+Shift+G still triggers a Ctrl+G binding.
pub fn modifiers_pressed(required: u32, held: u32) -> bool {
    required & held == required
}

/// Human-readable label for a binding, e.g. `Ctrl+Shift+F5`. Key 0
/// renders as `None`.
pub fn shortcut_label(key: u32, modifiers: u32) -> String {
    if key == 0 {
        return "None".to_string();
    }
    let mut label = String::new();
    if modifiers & MOD_CTRL != 0 {
        label.push_str("Ctrl+");
    }
    if modifiers & MOD_ALT != 0 {
        label.push_str("Alt+");
    }
    if modifiers & MOD_SHIFT != 0 {
        label.push_str("Shift+");
    }
    label.push_str(&key_name(key));
    label
}

/// Key portion of a shortcut label, following the persisted virtual-key
/// numbering. Codes outside the printable set fall back to `Key<n>`.
pub fn key_name(key: u32) -> String {
    match key {
        VK_SPACE => "Space".to_string(),
        VK_ESCAPE => "Escape".to_string(),
        0x30..=0x39 | 0x41..=0x5A => char::from(key as u8).to_string(),
        VK_F1..=VK_F12 => format!("F{}", key - VK_F1 + 1),
        other => format!("Key{other}"),
    }
}
