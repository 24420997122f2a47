use std::collections::HashMap;

use log::warn;
use serde_json::Value;

use super::types::{ParamDescriptor, ParamType};

/// Total f32 capacity of the per-preset custom uniform buffer (four float4s).
pub const PARAM_BUFFER_FLOATS: usize = 16;

const BLOCK_OPEN: &str = "/*{";
const BLOCK_CLOSE: &str = "}*/";

/// Parse the embedded parameter block out of shader source and allocate
/// buffer slots for each declared parameter.
///
/// The block sits between `/*{` and the first `}*/`; its interior is the body
/// of a JSON object with an `INPUTS` array. A missing block, a malformed
/// block, or an entry that cannot be understood all degrade to "fewer
/// parameters" rather than an error: a shader with no declared parameters is
/// valid.
///
/// Slots are assigned in declaration order against a 16-float budget.
/// Point2D values are aligned to even offsets and colors to multiples of 4 so
/// they never straddle a float4 boundary. The first parameter that does not
/// fit ends allocation; it and everything after it are dropped.
pub fn parse_schema(source: &str) -> Vec<ParamDescriptor> {
    let Some(block) = extract_block(source) else {
        return Vec::new();
    };

    let root: Value = match serde_json::from_str(&format!("{{{block}}}")) {
        Ok(v) => v,
        Err(e) => {
            warn!("Ignoring malformed parameter block: {e}");
            return Vec::new();
        }
    };
    let Some(inputs) = root.get("INPUTS").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut params = Vec::new();
    let mut offset = 0usize;

    for input in inputs {
        let Some(name) = input.get("NAME").and_then(Value::as_str) else {
            continue;
        };
        let Some(type_str) = input.get("TYPE").and_then(Value::as_str) else {
            continue;
        };
        let Some(param_type) = ParamType::from_schema_str(type_str) else {
            warn!("Skipping parameter '{name}': unknown type '{type_str}'");
            continue;
        };

        let mut param = ParamDescriptor::new(name, param_type);
        if let Some(label) = input.get("LABEL").and_then(Value::as_str) {
            param.label = label.to_string();
        }
        if let Some(v) = input.get("MIN").and_then(Value::as_f64) {
            param.min = v as f32;
        }
        if let Some(v) = input.get("MAX").and_then(Value::as_f64) {
            param.max = v as f32;
        }
        if let Some(v) = input.get("STEP").and_then(Value::as_f64) {
            param.step = v as f32;
        }
        if param_type == ParamType::Long {
            if let Some(values) = input.get("VALUES").and_then(Value::as_array) {
                param.option_labels = values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
            }
        }
        if let Some(default) = input.get("DEFAULT") {
            apply_default(&mut param, default);
        }
        param.current = param.default;

        let align = param_type.alignment();
        while offset % align != 0 {
            offset += 1;
        }
        let width = param_type.float_count();
        if offset + width > PARAM_BUFFER_FLOATS {
            // Budget exhausted; this and all later INPUTS are dropped. The
            // compiler reports an undeclared identifier if the shader body
            // still references one of them.
            warn!("Parameter buffer full, dropping '{name}' and later parameters");
            break;
        }
        param.slot_offset = offset;
        offset += width;
        params.push(param);
    }

    params
}

fn extract_block(source: &str) -> Option<&str> {
    let start = source.find(BLOCK_OPEN)?;
    let rest = &source[start + BLOCK_OPEN.len()..];
    let end = rest.find(BLOCK_CLOSE)?;
    Some(&rest[..end])
}

fn apply_default(param: &mut ParamDescriptor, default: &Value) {
    match default {
        Value::Array(items) => {
            for (i, item) in items.iter().take(4).enumerate() {
                if let Some(v) = item.as_f64() {
                    param.default[i] = v as f32;
                }
            }
        }
        Value::Bool(b) => {
            param.default[0] = if *b { 1.0 } else { 0.0 };
        }
        Value::Number(n) => {
            if let Some(v) = n.as_f64() {
                param.default[0] = v as f32;
            }
        }
        _ => {}
    }
}

/// Overwrite live values with persisted ones, matched by parameter name.
/// Names with no saved entry keep their parsed defaults.
pub fn apply_saved_values(params: &mut [ParamDescriptor], saved: &HashMap<String, Vec<f32>>) {
    for param in params {
        if let Some(values) = saved.get(&param.name) {
            for (i, v) in values.iter().take(4).enumerate() {
                param.current[i] = *v;
            }
        }
    }
}

/// Pack live values into the custom uniform buffer at their allocated slots.
pub fn pack_values(params: &[ParamDescriptor]) -> [f32; PARAM_BUFFER_FLOATS] {
    let mut buf = [0.0f32; PARAM_BUFFER_FLOATS];
    for param in params {
        let count = param.float_count();
        if param.slot_offset + count <= PARAM_BUFFER_FLOATS {
            buf[param.slot_offset..param.slot_offset + count]
                .copy_from_slice(&param.current[..count]);
        }
    }
    buf
}
