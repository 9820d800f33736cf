//! End-to-end tests for extraction followed by assembly.

use std::path::Path;

use drivergen_core::{
    extract, extract_with, header_reference, ErrorCode, ExtractError, ExtractOptions,
    ExtractStrategy, HostingArtifact,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Captures
// ============================================================================

const DEMO_CAPTURE: &str = "namespace demo_42 {\nstruct entry_fn : jank::runtime::obj::jit_function {\n  void call() {}\n};\n}\nHello from WASM!\n";

/// Shape of real `--codegen cpp run` output: a dependency's function struct,
/// the main struct, then program output and the printed result.
const REALISTIC_CAPTURE: &str = r#"namespace hello
{
  struct hello_greet_1 : jank::runtime::obj::jit_function
  {
    jank::runtime::var_ref const hello_println_3;

    hello_greet_1()
      : jank::runtime::obj::jit_function{ jank::runtime::__rt_ctx->read_string(
          "{:name \"hello/greet\"}") }
      , hello_println_3{ jank::runtime::__rt_ctx->intern_var("hello", "println").expect_ok() }
    {
    }

    jank::runtime::object_ref call() final
    {
      using namespace jank;
      using namespace jank::runtime;
      return jank::runtime::dynamic_call(hello_println_3->deref());
    }
  };

  struct hello__main_2 : jank::runtime::obj::jit_function
  {
    hello__main_2()
      : jank::runtime::obj::jit_function{ jank::runtime::__rt_ctx->read_string(
          "{:name \"hello/-main\"}") }
    {
    }

    jank::runtime::object_ref call() final
    {
      return jank::runtime::jank_nil;
    }
  };
}
Hello World
nil
"#;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_demo_end_to_end() {
    let extraction = extract(DEMO_CAPTURE).unwrap();
    assert_eq!(extraction.namespace, "demo_42");
    assert_eq!(extraction.entry_name, "entry_fn");
    assert!(!extraction.fragment.contains("Hello from WASM!"));

    let include = header_reference(
        Path::new("minimal_jank_runtime.hpp"),
        Path::new("out/driver.cpp"),
        Path::new("/work"),
    );
    let artifact = HostingArtifact::new(&extraction, &include);
    let text = artifact.text();

    assert!(text.starts_with("#include \"../minimal_jank_runtime.hpp\"\n"));
    assert!(text
        .lines()
        .any(|l| l.trim() == "using jank_entry_t = ::demo_42::entry_fn;"));
    assert!(!text.contains("Hello from WASM!"));
}

#[test]
fn test_realistic_capture_selects_main_struct() {
    for strategy in [
        ExtractStrategy::Auto,
        ExtractStrategy::LineScan,
        ExtractStrategy::Sentinel,
    ] {
        let extraction =
            extract_with(REALISTIC_CAPTURE, &ExtractOptions::with_strategy(strategy)).unwrap();
        assert_eq!(extraction.namespace, "hello", "strategy {}", strategy);
        assert_eq!(extraction.entry_name, "hello__main_2", "strategy {}", strategy);
        assert_eq!(
            extraction.entry_candidates,
            vec!["hello_greet_1", "hello__main_2"]
        );
    }
}

#[test]
fn test_line_scan_and_sentinel_disagree_on_program_output() {
    let line_scan = extract_with(
        REALISTIC_CAPTURE,
        &ExtractOptions::with_strategy(ExtractStrategy::LineScan),
    )
    .unwrap();
    assert!(line_scan.fragment.ends_with('}'));
    assert!(!line_scan.fragment.contains("Hello World"));

    // The sentinel cuts at `nil` only, so the program output survives.
    let sentinel = extract_with(
        REALISTIC_CAPTURE,
        &ExtractOptions::with_strategy(ExtractStrategy::Sentinel),
    )
    .unwrap();
    assert!(sentinel.fragment.ends_with("Hello World"));
}

#[test]
fn test_failures_carry_codes() {
    let cases: [(&str, &str); 3] = [
        ("\n\n", "EXTRACT_001"),
        ("int x = 1;\n", "EXTRACT_002"),
        ("namespace a {\n}\n", "EXTRACT_003"),
    ];
    for (raw, code) in cases {
        let err: ExtractError = extract(raw).unwrap_err();
        assert_eq!(err.code(), code, "input {:?}", raw);
    }
}

#[test]
fn test_assembling_twice_is_byte_identical() {
    let extraction = extract(REALISTIC_CAPTURE).unwrap();
    let a = HostingArtifact::new(&extraction, "runtime.hpp");
    let b = HostingArtifact::new(&extraction, "runtime.hpp");
    assert_eq!(a.into_string(), b.into_string());
}
