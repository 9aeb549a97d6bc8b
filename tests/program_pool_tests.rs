//! Program Pool Tests
//!
//! Tests for:
//! - Acquire/release lifecycle through `ProgramManager`
//! - At most one compile per live key
//! - Reference count bookkeeping across interleaved calls
//! - Compile failures leaving the pool untouched
//! - Misuse (unknown / over-released handles)
//! - Shader modifiers applied to the compiled source only

use std::collections::HashMap;

use myth_programs::{
    Capabilities, LightState, Material, MaterialKind, ProgramCompiler, ProgramError,
    ProgramHandle, ProgramKey, ProgramManager, ProgramParameters, RenderObject, RendererContext,
    RendererSettings, Result, ShaderModifier, ShaderSource,
};

// ============================================================================
// Mock compiler
// ============================================================================

/// Records every compile and destroy; fails on sources containing `FAIL`.
#[derive(Default)]
struct MockCompiler {
    compiled: Vec<String>,
    destroyed: Vec<MockProgram>,
}

#[derive(Debug, Clone, PartialEq)]
struct MockProgram {
    label: String,
    fragment: String,
}

impl ProgramCompiler for MockCompiler {
    type Program = MockProgram;

    fn compile(
        &mut self,
        key: &ProgramKey,
        _material: &Material,
        source: &ShaderSource,
        _parameters: &ProgramParameters,
    ) -> Result<MockProgram> {
        if source.fragment.contains("FAIL") {
            return Err(ProgramError::CompilationFailed {
                label: key.label(),
                message: "mock failure".into(),
            });
        }
        self.compiled.push(key.label());
        Ok(MockProgram {
            label: key.label(),
            fragment: source.fragment.clone(),
        })
    }

    fn destroy(&mut self, program: MockProgram) {
        self.destroyed.push(program);
    }
}

struct Harness {
    renderer: RendererContext,
    manager: ProgramManager<MockCompiler>,
}

impl Harness {
    fn new() -> Self {
        Self {
            renderer: RendererContext::default(),
            manager: ProgramManager::new(MockCompiler::default(), Capabilities::default()),
        }
    }

    fn key(&self, material: &Material) -> (ProgramParameters, ProgramKey) {
        let params = self.manager.get_parameters(
            &self.renderer,
            material,
            &LightState::default(),
            None,
            0,
            0,
            &RenderObject::new(),
        );
        let key = self.manager.get_program_code(&self.renderer, material, &params);
        (params, key)
    }

    fn acquire(&mut self, material: &Material) -> Result<ProgramHandle> {
        let (params, key) = self.key(material);
        let source = ShaderSource::new("test", "vs", "fs");
        self.manager.acquire_program(material, &source, &params, &key)
    }

    fn compiles(&self) -> usize {
        self.manager.programs().compiler().compiled.len()
    }

    fn destroys(&self) -> usize {
        self.manager.programs().compiler().destroyed.len()
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn acquire_release_lifecycle() {
    let mut h = Harness::new();
    let standard = Material::new(MaterialKind::MeshStandard);

    let a = h.acquire(&standard).unwrap();
    let b = h.acquire(&standard).unwrap();

    assert_eq!(a, b);
    assert_eq!(h.manager.programs().len(), 1);
    assert_eq!(h.compiles(), 1);
    assert_eq!(h.manager.programs().get(a).unwrap().used_times(), 2);

    h.manager.release_program(a).unwrap();
    assert_eq!(h.manager.programs().get(a).unwrap().used_times(), 1);
    assert_eq!(h.destroys(), 0);

    h.manager.release_program(b).unwrap();
    assert!(h.manager.programs().is_empty());
    assert_eq!(h.destroys(), 1);
}

#[test]
fn distinct_keys_compile_separately() {
    let mut h = Harness::new();

    let basic = h.acquire(&Material::new(MaterialKind::MeshBasic)).unwrap();
    let phong = h.acquire(&Material::new(MaterialKind::MeshPhong)).unwrap();
    let toon = h.acquire(&Material::new(MaterialKind::MeshToon)).unwrap();

    assert_ne!(basic, phong);
    // Toon shares the phong family and parameters.
    assert_eq!(phong, toon);
    assert_eq!(h.compiles(), 2);
    assert_eq!(h.manager.programs().len(), 2);
}

#[test]
fn settings_change_yields_new_variant() {
    let mut h = Harness::new();
    let material = Material::new(MaterialKind::MeshStandard);

    let linear = h.acquire(&material).unwrap();

    h.renderer = RendererContext::new(RendererSettings {
        gamma_output: true,
        ..Default::default()
    });
    let gamma = h.acquire(&material).unwrap();

    assert_ne!(linear, gamma);
    assert_eq!(h.compiles(), 2);
}

#[test]
fn used_times_matches_outstanding_acquisitions() {
    let mut h = Harness::new();
    let materials = [
        Material::new(MaterialKind::MeshBasic),
        Material::new(MaterialKind::MeshLambert),
        Material::new(MaterialKind::MeshStandard),
    ];

    let mut outstanding: HashMap<ProgramHandle, u32> = HashMap::new();
    let mut held = Vec::new();

    // Deterministic interleaving of acquires and releases.
    for step in 0..60usize {
        if step % 3 == 2 && !held.is_empty() {
            let handle = held.remove(step % held.len());
            h.manager.release_program(handle).unwrap();
            let count = outstanding.get_mut(&handle).unwrap();
            *count -= 1;
            if *count == 0 {
                outstanding.remove(&handle);
            }
        } else {
            let handle = h.acquire(&materials[step % materials.len()]).unwrap();
            *outstanding.entry(handle).or_default() += 1;
            held.push(handle);
        }

        assert_eq!(h.manager.programs().len(), outstanding.len());
        for entry in h.manager.programs().iter() {
            assert_eq!(Some(&entry.used_times()), outstanding.get(&entry.handle()));
            assert!(entry.used_times() >= 1);
        }
    }

    for handle in held {
        h.manager.release_program(handle).unwrap();
    }
    assert!(h.manager.programs().is_empty());
    assert_eq!(h.compiles(), h.destroys());
}

#[test]
fn handles_stay_valid_after_swap_remove() {
    let mut h = Harness::new();

    let first = h.acquire(&Material::new(MaterialKind::MeshBasic)).unwrap();
    let second = h.acquire(&Material::new(MaterialKind::MeshLambert)).unwrap();
    let third = h.acquire(&Material::new(MaterialKind::MeshStandard)).unwrap();

    h.manager.release_program(first).unwrap();

    let pool = h.manager.programs();
    assert!(pool.get(first).is_none());
    assert!(pool.program(second).unwrap().label.starts_with("lambert#"));
    assert!(pool.program(third).unwrap().label.starts_with("physical#"));
}

// ============================================================================
// Failures and misuse
// ============================================================================

#[test]
fn compile_failure_inserts_nothing() {
    let mut h = Harness::new();
    let ok = h.acquire(&Material::new(MaterialKind::MeshBasic)).unwrap();

    let mut broken = Material::new(MaterialKind::MeshStandard);
    broken.on_before_compile = Some(ShaderModifier::new("break", |s| {
        s.fragment.push_str("FAIL");
    }));

    let err = h.acquire(&broken).unwrap_err();
    assert!(matches!(err, ProgramError::CompilationFailed { .. }));
    assert_eq!(h.manager.programs().len(), 1);
    assert_eq!(h.manager.programs().get(ok).unwrap().used_times(), 1);

    // A later attempt compiles again rather than reusing a cached failure.
    assert!(h.acquire(&broken).is_err());
    assert_eq!(h.manager.programs().len(), 1);
}

#[test]
fn releasing_unknown_handle_errors() {
    let mut h = Harness::new();
    let handle = h.acquire(&Material::default()).unwrap();
    h.manager.release_program(handle).unwrap();

    let err = h.manager.release_program(handle).unwrap_err();
    assert!(matches!(err, ProgramError::UnknownProgram(x) if x == handle));
    assert_eq!(h.destroys(), 1);
}

#[test]
fn handles_from_another_pool_are_rejected() {
    let mut a = Harness::new();
    let mut b = Harness::new();

    a.acquire(&Material::default()).unwrap();
    let foreign = a.acquire(&Material::new(MaterialKind::MeshPhong)).unwrap();

    assert!(b.manager.release_program(foreign).is_err());
    assert!(b.manager.programs().is_empty());
}

// ============================================================================
// Shader modifiers
// ============================================================================

#[test]
fn modifier_edits_compiled_source_only() {
    let mut h = Harness::new();

    let mut material = Material::new(MaterialKind::MeshStandard);
    material.on_before_compile = Some(ShaderModifier::new("tint", |s| {
        s.fragment.push_str("// tinted");
    }));

    let handle = h.acquire(&material).unwrap();
    let program = h.manager.programs().program(handle).unwrap();
    assert_eq!(program.fragment, "fs// tinted");

    let plain = h.acquire(&Material::new(MaterialKind::MeshStandard)).unwrap();
    assert_ne!(handle, plain);
    assert_eq!(h.manager.programs().program(plain).unwrap().fragment, "fs");
}

#[test]
fn dropping_the_manager_destroys_live_programs() {
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting(Rc<Cell<u32>>);

    impl ProgramCompiler for Counting {
        type Program = ();

        fn compile(
            &mut self,
            _: &ProgramKey,
            _: &Material,
            _: &ShaderSource,
            _: &ProgramParameters,
        ) -> Result<()> {
            Ok(())
        }

        fn destroy(&mut self, (): ()) {
            self.0.set(self.0.get() + 1);
        }
    }

    let destroyed = Rc::new(Cell::new(0));
    {
        let renderer = RendererContext::default();
        let mut manager =
            ProgramManager::new(Counting(Rc::clone(&destroyed)), Capabilities::default());

        for kind in [MaterialKind::MeshBasic, MaterialKind::MeshPhong] {
            let material = Material::new(kind);
            let params = manager.get_parameters(
                &renderer,
                &material,
                &LightState::default(),
                None,
                0,
                0,
                &RenderObject::new(),
            );
            let key = manager.get_program_code(&renderer, &material, &params);
            let source = ShaderSource::new("test", "vs", "fs");
            manager
                .acquire_program(&material, &source, &params, &key)
                .unwrap();
        }
    }
    assert_eq!(destroyed.get(), 2);
}
