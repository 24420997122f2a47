use std::fmt::Write;

use super::schema::PARAM_BUFFER_FLOATS;
use super::types::{ParamDescriptor, ParamType};

const COMPONENTS: [char; 4] = ['x', 'y', 'z', 'w'];

/// Build the `#define` preamble that aliases each parameter name to its
/// allocated cell of the `custom` float4 array. Prepended to shader source
/// before compilation so the body can reference parameters by name.
///
/// Pure function of the allocated schema: the same descriptors always
/// produce byte-identical output.
pub fn build_preamble(params: &[ParamDescriptor]) -> String {
    let mut preamble = String::new();
    for param in params {
        if param.slot_offset >= PARAM_BUFFER_FLOATS {
            continue;
        }
        let idx = param.slot_offset / 4;
        let comp = COMPONENTS[param.slot_offset % 4];
        let name = &param.name;
        // Writing to a String cannot fail.
        let _ = match param.param_type {
            ParamType::Float | ParamType::Event => {
                writeln!(preamble, "#define {name} custom[{idx}].{comp}")
            }
            ParamType::Bool => {
                writeln!(preamble, "#define {name} (custom[{idx}].{comp} > 0.5)")
            }
            ParamType::Long => {
                writeln!(preamble, "#define {name} int(custom[{idx}].{comp})")
            }
            ParamType::Point2D => {
                // Even alignment puts comp at x or z, so the partner
                // component is always in range.
                let next = COMPONENTS[param.slot_offset % 4 + 1];
                writeln!(
                    preamble,
                    "#define {name} float2(custom[{idx}].{comp}, custom[{idx}].{next})"
                )
            }
            ParamType::Color => {
                // 4-alignment means a color always owns the whole vector.
                writeln!(preamble, "#define {name} custom[{idx}]")
            }
        };
    }
    preamble
}
