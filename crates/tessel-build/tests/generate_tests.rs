/*
 * generate_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end generation tests over temporary source trees.
 */

use std::fs;
use std::path::Path;
use tessel_build::{BuildError, generate_all, read_text_detecting_bom};
use tessel_template::{Compiler, TextInterpolator};

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dir");
    }
    fs::write(path, content).expect("write");
}

#[test]
fn generates_one_file_per_unit() {
    let source = tempfile::tempdir().expect("tempdir");
    let dest = tempfile::tempdir().expect("tempdir");
    write(
        &source.path().join("Greeting.txt.tessel"),
        "Hello, {{audience:Audience}}!",
    );
    write(&source.path().join("Farewell.txt.tessel"), "Bye.");

    generate_all(&Compiler::new(), source.path(), dest.path()).expect("generate");

    let greeting = fs::read_to_string(dest.path().join("greeting.rs")).expect("read");
    assert!(greeting.starts_with("// Generated by tessel. Do not edit."));
    assert!(greeting.contains("pub mod greeting {"));
    assert!(greeting.contains("pub mod txt {"));
    assert!(greeting.contains("pub trait Formatter<Audience> {"));

    assert!(dest.path().join("farewell.rs").exists());
}

#[test]
fn sibling_formats_share_one_unit_in_sorted_order() {
    let source = tempfile::tempdir().expect("tempdir");
    let dest = tempfile::tempdir().expect("tempdir");
    write(&source.path().join("Note.txt.tessel"), "{{body:Body}}");
    write(
        &source.path().join("Note.html.tessel"),
        "<p>{{body:Body}}</p>",
    );

    let mut compiler = Compiler::new();
    compiler.register("html", Box::new(TextInterpolator));
    generate_all(&compiler, source.path(), dest.path()).expect("generate");

    let note = fs::read_to_string(dest.path().join("note.rs")).expect("read");
    let html = note.find("pub mod html {").expect("html module");
    let txt = note.find("pub mod txt {").expect("txt module");
    assert!(html < txt);
    assert!(!dest.path().join("note_html.rs").exists());
}

#[test]
fn output_mirrors_the_source_layout() {
    let source = tempfile::tempdir().expect("tempdir");
    let dest = tempfile::tempdir().expect("tempdir");
    write(&source.path().join("mail/Digest.txt.tessel"), "digest");

    generate_all(&Compiler::new(), source.path(), dest.path()).expect("generate");

    assert!(dest.path().join("mail/digest.rs").exists());
}

#[test]
fn destination_is_cleared_before_generation() {
    let source = tempfile::tempdir().expect("tempdir");
    let dest = tempfile::tempdir().expect("tempdir");
    write(&source.path().join("Fresh.txt.tessel"), "fresh");
    write(&dest.path().join("stale.rs"), "stale");

    generate_all(&Compiler::new(), source.path(), dest.path()).expect("generate");

    assert!(!dest.path().join("stale.rs").exists());
    assert!(dest.path().join("fresh.rs").exists());
}

#[test]
fn bom_marked_templates_compile() {
    let source = tempfile::tempdir().expect("tempdir");
    let dest = tempfile::tempdir().expect("tempdir");

    // "hi {{x:T}}" as UTF-16LE with its byte-order mark.
    let text = "hi {{x:T}}";
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let path = source.path().join("Marked.txt.tessel");
    fs::write(&path, bytes).expect("write");

    assert_eq!(read_text_detecting_bom(&path).expect("decode"), text);
    generate_all(&Compiler::new(), source.path(), dest.path()).expect("generate");
    assert!(dest.path().join("marked.rs").exists());
}

#[test]
fn compile_failures_name_the_template_file() {
    let source = tempfile::tempdir().expect("tempdir");
    let dest = tempfile::tempdir().expect("tempdir");
    write(&source.path().join("Broken.txt.tessel"), "{{x:T}");

    let error = generate_all(&Compiler::new(), source.path(), dest.path())
        .expect_err("malformed template");
    match error {
        BuildError::Compile { path, .. } => {
            assert!(path.ends_with("Broken.txt.tessel"));
        }
        other => panic!("expected a compile error, got {other}"),
    }
}

#[test]
fn unregistered_formats_fail_the_run() {
    let source = tempfile::tempdir().expect("tempdir");
    let dest = tempfile::tempdir().expect("tempdir");
    write(&source.path().join("Page.svg.tessel"), "unsupported");

    let error = generate_all(&Compiler::new(), source.path(), dest.path())
        .expect_err("unknown format selector");
    assert!(matches!(error, BuildError::Compile { .. }));
}
