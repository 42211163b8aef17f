/*
 * render_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for formatter rendering.
 */

use pretty_assertions::assert_eq;
use tessel_emit::{EmitError, Placement, UnitMember, render_formatter, render_unit};
use tessel_runtime::Text;
use tessel_template::{Compiler, Fragment, FormatterDescription};

fn compile(source: &str) -> FormatterDescription {
    Compiler::new().compile("txt", source).expect("compile")
}

fn placement(unit: &str) -> Placement {
    Placement {
        unit: unit.to_string(),
        enclosing_unit: None,
    }
}

#[test]
fn renders_trait_instance_and_constructor() {
    let description = compile("Hello, {{audience:Audience}}!");
    let rendered = render_formatter(&placement("txt"), &description).expect("render");

    assert!(rendered.contains("pub mod txt {"));
    assert!(rendered.contains("pub trait Formatter<Audience> {"));
    assert!(rendered.contains(
        "fn format(&self, audience: &dyn Fn(&Audience) -> tessel_runtime::Text) -> tessel_runtime::Text;"
    ));
    assert!(rendered.contains("pub struct Instance<Audience> {"));
    assert!(rendered.contains("pub audience: Audience,"));
    assert!(rendered.contains("impl<Audience> Formatter<Audience> for Instance<Audience> {"));
    assert!(rendered.contains(
        "pub fn formatter<Audience>(audience: Audience) -> Instance<Audience> {"
    ));
    assert!(rendered.contains("Instance { audience }"));
}

#[test]
fn body_is_a_right_nested_catenation() {
    let description = compile("Hello, {{audience:Audience}}!");
    let rendered = render_formatter(&placement("txt"), &description).expect("render");
    assert!(rendered.contains(
        "tessel_runtime::Text::from(\"Hello, \") + (audience(&self.audience) + (tessel_runtime::Text::from(\"!\")))"
    ));
}

/// The shape the renderer emits, written out by hand and evaluated against
/// the runtime, so the emitted expression structure is known to work.
#[test]
fn emitted_shape_evaluates_against_the_runtime() {
    struct Instance<Audience> {
        audience: Audience,
    }

    impl<Audience> Instance<Audience> {
        fn format(&self, audience: &dyn Fn(&Audience) -> Text) -> Text {
            Text::from("Hello, ") + (audience(&self.audience) + (Text::from("!")))
        }
    }

    let instance = Instance {
        audience: "World".to_string(),
    };
    let rendered = instance.format(&|audience: &String| Text::from(audience.as_str()));
    assert_eq!(rendered.compile(), "Hello, World!");
}

#[test]
fn marker_free_template_renders_a_parameterless_formatter() {
    let description = compile("just text");
    let rendered = render_formatter(&placement("txt"), &description).expect("render");

    assert!(rendered.contains("pub trait Formatter {"));
    assert!(rendered.contains("fn format(&self) -> tessel_runtime::Text;"));
    assert!(rendered.contains("pub struct Instance;"));
    assert!(rendered.contains("pub fn formatter() -> Instance {"));
    assert!(rendered.contains("tessel_runtime::Text::from(\"just text\")"));
}

#[test]
fn empty_template_body_falls_back_to_default() {
    let description = compile("");
    let rendered = render_formatter(&placement("txt"), &description).expect("render");
    assert!(rendered.contains("tessel_runtime::Text::default()"));
}

#[test]
fn placement_nests_inside_the_enclosing_unit() {
    let description = compile("x");
    let rendered = render_formatter(
        &Placement {
            unit: "txt".to_string(),
            enclosing_unit: Some("Greeting".to_string()),
        },
        &description,
    )
    .expect("render");
    assert!(rendered.starts_with("pub mod greeting {\n    pub mod txt {\n"));
}

#[test]
fn unit_rendering_nests_each_format_member() {
    let members = vec![
        UnitMember {
            format: "html".to_string(),
            description: compile("<p>{{body:Body}}</p>"),
        },
        UnitMember {
            format: "txt".to_string(),
            description: compile("{{body:Body}}"),
        },
    ];
    let rendered = render_unit("Note", None, &members).expect("render");

    assert!(rendered.starts_with("pub mod note {\n"));
    let html = rendered.find("pub mod html {").expect("html module");
    let txt = rendered.find("pub mod txt {").expect("txt module");
    assert!(html < txt);
}

#[test]
fn unit_rendering_puts_base_items_at_unit_level() {
    let rendered =
        render_unit("txt", Some(&compile("base text")), &[]).expect("render");
    assert!(rendered.starts_with("pub mod txt {\n    pub trait Formatter {"));
}

#[test]
fn declared_type_identifiers_are_sanitized() {
    let description = compile("{{qty,max:count-of-items}}");
    let rendered = render_formatter(&placement("txt"), &description).expect("render");
    assert!(rendered.contains("pub trait Formatter<CountOfItems> {"));
    assert!(rendered.contains("count_of_items: &dyn Fn(&CountOfItems) -> tessel_runtime::Text"));
    assert!(rendered.contains("pub qty_max: CountOfItems,"));
    assert!(rendered.contains("count_of_items(&self.qty_max)"));
}

#[test]
fn splice_codes_demand_matching_arguments() {
    let description = FormatterDescription {
        type_parameters: vec![],
        value_parameters: vec![],
        output_type: tessel_template::TypeRef::new("tessel_runtime::Text"),
        body: vec![Fragment::plain("%S")],
    };
    let error = render_formatter(&placement("txt"), &description).expect_err("missing argument");
    assert_eq!(
        error,
        EmitError::MissingArgument {
            text: "%S".to_string(),
            expected: "constant".to_string(),
        }
    );
}
