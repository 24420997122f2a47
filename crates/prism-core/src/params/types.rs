/// Parameter types a shader can declare in its embedded block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Float,
    Bool,
    /// Integer dropdown; packed as a float, cast back in the preamble.
    Long,
    Color,
    Point2D,
    /// One-shot trigger. The render loop sets it truthy on the keypress and
    /// clears it back to 0.0 one frame later; this crate only packs it.
    Event,
}

impl ParamType {
    /// Maps the type tag as written in a shader's parameter block.
    pub fn from_schema_str(s: &str) -> Option<ParamType> {
        match s {
            "float" => Some(ParamType::Float),
            "bool" => Some(ParamType::Bool),
            "long" => Some(ParamType::Long),
            "color" => Some(ParamType::Color),
            "point2d" => Some(ParamType::Point2D),
            "event" => Some(ParamType::Event),
            _ => None,
        }
    }

    /// Number of f32 slots this type occupies in the custom uniform buffer.
    pub fn float_count(self) -> usize {
        match self {
            ParamType::Color => 4,
            ParamType::Point2D => 2,
            _ => 1,
        }
    }

    /// Required alignment of the slot offset, in floats.
    pub fn alignment(self) -> usize {
        match self {
            ParamType::Color => 4,
            ParamType::Point2D => 2,
            _ => 1,
        }
    }
}

/// One tunable parameter declared by a shader, with its allocated position
/// in the 16-float custom uniform buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    pub name: String,
    /// Display label; falls back to `name` when the block omits LABEL.
    pub label: String,
    pub param_type: ParamType,
    /// Live value, packed as up to 4 floats (1 scalar / 2 point / 4 color).
    pub current: [f32; 4],
    pub default: [f32; 4],
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Dropdown labels for Long parameters; empty for other types.
    pub option_labels: Vec<String>,
    /// First float this parameter occupies in the custom buffer.
    pub slot_offset: usize,
}

impl ParamDescriptor {
    pub fn new(name: &str, param_type: ParamType) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            param_type,
            current: [0.0; 4],
            default: [0.0; 4],
            min: 0.0,
            max: 1.0,
            step: 0.01,
            option_labels: Vec::new(),
            slot_offset: 0,
        }
    }

    /// Number of f32 slots this parameter occupies.
    pub fn float_count(&self) -> usize {
        self.param_type.float_count()
    }

    /// Restore the default value.
    pub fn reset(&mut self) {
        self.current = self.default;
    }
}
