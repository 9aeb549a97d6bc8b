//! Program Pool
//!
//! Reference-counted storage for compiled programs.
//!
//! Programs live in a flat `Vec` and are found by linear scan over their keys.
//! A renderer keeps a few dozen variants alive at most, and the scan compares
//! precomputed digests before touching key text.
//!
//! # Lifecycle
//!
//! ```text
//! acquire(key) ── miss ──▶ compile ──▶ push { used_times: 1 }
//!      │
//!      └────────── hit ───▶ used_times += 1
//!
//! release(handle) ──▶ used_times -= 1 ──▶ 0? swap_remove + destroy
//! ```
//!
//! Drawables hold [`ProgramHandle`]s, never indices: `swap_remove` reorders
//! the storage, but a handle stays valid until its program is destroyed.

use crate::errors::{ProgramError, Result};
use crate::renderer::programs::compiler::{ProgramCompiler, ShaderSource};
use crate::renderer::programs::parameters::ProgramParameters;
use crate::renderer::programs::program_key::ProgramKey;
use crate::resources::material::Material;

/// Stable identity of a live pooled program.
///
/// Handles are never reused within one pool, so a handle to a destroyed
/// program cannot alias a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub(crate) u64);

impl ProgramHandle {
    #[inline]
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A compiled program together with its key and reference count.
#[derive(Debug)]
pub struct PooledProgram<P> {
    handle: ProgramHandle,
    key: ProgramKey,
    program: P,
    used_times: u32,
}

impl<P> PooledProgram<P> {
    #[inline]
    #[must_use]
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &ProgramKey {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn program(&self) -> &P {
        &self.program
    }

    /// Outstanding acquisitions. Always at least 1 while pooled.
    #[inline]
    #[must_use]
    pub fn used_times(&self) -> u32 {
        self.used_times
    }
}

pub struct ProgramPool<C: ProgramCompiler> {
    compiler: C,
    programs: Vec<PooledProgram<C::Program>>,
    next_id: u64,
}

impl<C: ProgramCompiler> ProgramPool<C> {
    #[must_use]
    pub fn new(compiler: C) -> Self {
        Self {
            compiler,
            programs: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the program for `key`, compiling it on first use.
    ///
    /// On a hit the existing program's count is incremented. On a miss the
    /// material's shader modifier is applied to `source`, the compiler runs
    /// synchronously, and the result is stored with a count of 1. A failed
    /// compile leaves the pool untouched.
    pub fn acquire(
        &mut self,
        material: &Material,
        source: &ShaderSource,
        parameters: &ProgramParameters,
        key: &ProgramKey,
    ) -> Result<ProgramHandle> {
        if let Some(entry) = self.programs.iter_mut().find(|p| p.key == *key) {
            entry.used_times += 1;
            log::trace!(
                "Reusing program {} ({} users)",
                key.label(),
                entry.used_times
            );
            return Ok(entry.handle);
        }

        let source = material.modified_source(source);
        let program = self.compiler.compile(key, material, &source, parameters)?;

        let handle = ProgramHandle(self.next_id);
        self.next_id += 1;

        log::debug!(
            "Compiled program {} ({} live)",
            key.label(),
            self.programs.len() + 1
        );

        self.programs.push(PooledProgram {
            handle,
            key: key.clone(),
            program,
            used_times: 1,
        });

        Ok(handle)
    }

    /// Drops one reference to `handle`, destroying the program at zero.
    ///
    /// # Errors
    ///
    /// [`ProgramError::UnknownProgram`] if `handle` is not live in this pool.
    pub fn release(&mut self, handle: ProgramHandle) -> Result<()> {
        let index = self
            .position(handle)
            .ok_or(ProgramError::UnknownProgram(handle))?;

        let entry = &mut self.programs[index];
        entry.used_times -= 1;
        if entry.used_times > 0 {
            return Ok(());
        }

        let entry = self.programs.swap_remove(index);
        log::debug!("Released program {}", entry.key.label());
        self.compiler.destroy(entry.program);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, handle: ProgramHandle) -> Option<&PooledProgram<C::Program>> {
        self.programs.iter().find(|p| p.handle == handle)
    }

    #[must_use]
    pub fn program(&self, handle: ProgramHandle) -> Option<&C::Program> {
        self.get(handle).map(PooledProgram::program)
    }

    /// Live program for `key`, if any. Does not change its count.
    #[must_use]
    pub fn find(&self, key: &ProgramKey) -> Option<&PooledProgram<C::Program>> {
        self.programs.iter().find(|p| p.key == *key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Live programs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &PooledProgram<C::Program>> {
        self.programs.iter()
    }

    #[must_use]
    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    fn position(&self, handle: ProgramHandle) -> Option<usize> {
        self.programs.iter().position(|p| p.handle == handle)
    }
}

impl<C: ProgramCompiler> Drop for ProgramPool<C> {
    fn drop(&mut self) {
        for entry in self.programs.drain(..) {
            self.compiler.destroy(entry.program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::material::MaterialKind;

    /// Compiles to the key text and records every call.
    #[derive(Default)]
    struct RecordingCompiler {
        compiled: Vec<String>,
        destroyed: Vec<String>,
    }

    impl ProgramCompiler for RecordingCompiler {
        type Program = String;

        fn compile(
            &mut self,
            key: &ProgramKey,
            _material: &Material,
            _source: &ShaderSource,
            _parameters: &ProgramParameters,
        ) -> Result<String> {
            self.compiled.push(key.to_string());
            Ok(key.to_string())
        }

        fn destroy(&mut self, program: String) {
            self.destroyed.push(program);
        }
    }

    fn parameters() -> ProgramParameters {
        use crate::renderer::capabilities::Capabilities;
        use crate::renderer::programs::parameters::ParameterDeriver;
        use crate::renderer::programs::shader_library::ShaderLibrary;
        use crate::renderer::settings::RendererContext;
        use crate::scene::light::LightState;
        use crate::scene::object::RenderObject;

        let renderer = RendererContext::default();
        let caps = Capabilities::default();
        let library = ShaderLibrary::default();
        ParameterDeriver::new(&renderer, &caps, &library).derive(
            &Material::default(),
            &LightState::default(),
            None,
            0,
            0,
            &RenderObject::new(),
        )
    }

    fn source() -> ShaderSource {
        ShaderSource::new("basic", "vs", "fs")
    }

    #[test]
    fn hit_increments_without_compiling() {
        let mut pool = ProgramPool::new(RecordingCompiler::default());
        let material = Material::new(MaterialKind::MeshBasic);
        let params = parameters();
        let key = ProgramKey::from("A");

        let a = pool.acquire(&material, &source(), &params, &key).unwrap();
        let b = pool.acquire(&material, &source(), &params, &key).unwrap();

        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(a).unwrap().used_times(), 2);
        assert_eq!(pool.compiler().compiled.len(), 1);
    }

    #[test]
    fn release_at_zero_destroys() {
        let mut pool = ProgramPool::new(RecordingCompiler::default());
        let material = Material::default();
        let params = parameters();
        let key = ProgramKey::from("A");

        let h = pool.acquire(&material, &source(), &params, &key).unwrap();
        pool.acquire(&material, &source(), &params, &key).unwrap();

        pool.release(h).unwrap();
        assert_eq!(pool.len(), 1);
        assert!(pool.compiler().destroyed.is_empty());

        pool.release(h).unwrap();
        assert!(pool.is_empty());
        assert_eq!(pool.compiler().destroyed, vec!["A".to_string()]);

        assert!(matches!(pool.release(h), Err(ProgramError::UnknownProgram(x)) if x == h));
    }

    #[test]
    fn handles_survive_swap_remove() {
        let mut pool = ProgramPool::new(RecordingCompiler::default());
        let material = Material::default();
        let params = parameters();

        let a = pool.acquire(&material, &source(), &params, &"A".into()).unwrap();
        let b = pool.acquire(&material, &source(), &params, &"B".into()).unwrap();
        let c = pool.acquire(&material, &source(), &params, &"C".into()).unwrap();

        pool.release(a).unwrap();

        assert_eq!(pool.program(b).map(String::as_str), Some("B"));
        assert_eq!(pool.program(c).map(String::as_str), Some("C"));
        assert!(pool.get(a).is_none());
    }

    #[test]
    fn handles_are_not_reused() {
        let mut pool = ProgramPool::new(RecordingCompiler::default());
        let material = Material::default();
        let params = parameters();
        let key = ProgramKey::from("A");

        let first = pool.acquire(&material, &source(), &params, &key).unwrap();
        pool.release(first).unwrap();
        let second = pool.acquire(&material, &source(), &params, &key).unwrap();

        assert_ne!(first, second);
        assert_eq!(pool.compiler().compiled.len(), 2);
    }

    #[test]
    fn drop_destroys_remaining_programs() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Counting(Rc<RefCell<u32>>);

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
                *self.0.borrow_mut() += 1;
            }
        }

        let destroyed = Rc::new(RefCell::new(0));
        {
            let mut pool = ProgramPool::new(Counting(Rc::clone(&destroyed)));
            let material = Material::default();
            let params = parameters();
            pool.acquire(&material, &source(), &params, &"A".into()).unwrap();
            pool.acquire(&material, &source(), &params, &"B".into()).unwrap();
        }
        assert_eq!(*destroyed.borrow(), 2);
    }
}
