//! Shader validation tests
//!
//! Parses and validates the built-in WGSL with naga so malformed shader
//! source fails here rather than at device creation time inside a host.

use hero_particles::shaders;

fn parse() -> naga::Module {
    naga::front::wgsl::parse_str(shaders::builtin::POSITION_INTEGRATE)
        .expect("position integration shader should parse as WGSL")
}

#[test]
fn test_shader_parses() {
    parse();
}

#[test]
fn test_shader_validates() {
    let module = parse();
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    validator
        .validate(&module)
        .expect("position integration shader should validate");
}

#[test]
fn test_entry_points() {
    let module = parse();
    let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}

#[test]
fn test_binding_indices() {
    // integrate.rs builds bind groups against these exact indices.
    let module = parse();

    let binding_of = |wanted: &str| -> u32 {
        module
            .global_variables
            .iter()
            .find_map(|(_, var)| {
                if var.name.as_deref() == Some(wanted) {
                    var.binding.as_ref().map(|b| {
                        assert_eq!(b.group, 0, "{wanted} should live in group 0");
                        b.binding
                    })
                } else {
                    None
                }
            })
            .unwrap_or_else(|| panic!("shader should declare `{wanted}`"))
    };

    assert_eq!(binding_of("velocity"), 0);
    assert_eq!(binding_of("positions"), 1);
    assert_eq!(binding_of("data_sampler"), 2);
}
