//! Program cache keys.
//!
//! A [`ProgramKey`] is the canonical string identity of a shader variant. Two
//! draws with equal keys must be able to share one compiled program.
//!
//! # Layout
//!
//! Fields are appended in a fixed order:
//!
//! 1. `id,<family>` or `src,<fragment>,<vertex>` when the material has no
//!    shader family; a missing stage source is written as `-`
//! 2. macro count, then every `(name, value)` pair in declaration order
//! 3. every [`ProgramParameters`] field, in the order written by `write_parameters`
//! 4. the shader modifier's source text, or `-`
//! 5. the renderer's output gamma flag
//!
//! Every entry ends with `,`. Free text (family names, source, macro names
//! and values, modifier text) is written as `<byte length>:<text>`, so its content can
//! never be mistaken for a field boundary. All other entries come from closed
//! vocabularies that contain neither `,` nor `:`.
//!
//! The order is part of the key format: reordering fields would not break a
//! running process, but it would orphan any persisted cache.

use std::fmt::Write;

use xxhash_rust::xxh3::xxh3_64;

use crate::renderer::programs::parameters::ProgramParameters;
use crate::resources::material::Material;

/// Canonical identity of a shader variant.
///
/// Equality compares the precomputed xxh3 digest first and the full text
/// only when digests match.
#[derive(Debug, Clone)]
pub struct ProgramKey {
    text: String,
    digest: u64,
}

impl ProgramKey {
    /// Encodes the key for `material` drawn with `parameters`.
    ///
    /// `gamma_output` is the renderer's legacy output gamma flag.
    #[must_use]
    pub fn encode(material: &Material, parameters: &ProgramParameters, gamma_output: bool) -> Self {
        let mut w = KeyWriter::with_capacity(512);

        match parameters.shader_id {
            Some(id) => {
                w.token("id");
                w.text(id.as_str());
            }
            None => {
                w.token("src");
                w.opt_text(material.fragment_shader.as_deref());
                w.opt_text(material.vertex_shader.as_deref());
            }
        }

        w.uint(material.defines.len() as u32);
        for (name, value) in material.defines.iter() {
            w.text(name);
            w.text(value);
        }

        write_parameters(&mut w, parameters);

        match &material.on_before_compile {
            Some(modifier) => {
                w.token("fn");
                w.text(modifier.source());
            }
            None => w.token("-"),
        }

        w.flag(gamma_output);

        Self::from_string(w.finish())
    }

    /// Wraps pre-encoded key text.
    #[must_use]
    pub fn from_string(text: String) -> Self {
        let digest = xxh3_64(text.as_bytes());
        Self { text, digest }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// xxh3-64 digest of the key text.
    #[inline]
    #[must_use]
    pub fn digest(&self) -> u64 {
        self.digest
    }

    /// Short human-readable label for logs and GPU object labels.
    #[must_use]
    pub fn label(&self) -> String {
        let family = self
            .text
            .strip_prefix("id,")
            .and_then(|rest| {
                let (len, rest) = rest.split_once(':')?;
                rest.get(..len.parse::<usize>().ok()?)
            })
            .unwrap_or("custom");
        format!("{family}#{:08x}", self.digest as u32)
    }
}

impl PartialEq for ProgramKey {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.text == other.text
    }
}

impl Eq for ProgramKey {}

impl std::hash::Hash for ProgramKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest);
    }
}

impl std::fmt::Display for ProgramKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for ProgramKey {
    fn from(text: &str) -> Self {
        Self::from_string(text.to_string())
    }
}

/// Appends every parameter field in key order.
fn write_parameters(w: &mut KeyWriter, p: &ProgramParameters) {
    w.token(p.precision.as_str());
    w.flag(p.supports_vertex_textures);
    w.token(p.output_encoding.as_str());
    w.flag(p.map);
    w.token(p.map_encoding.as_str());
    w.flag(p.env_map);
    w.opt(p.env_map_mode.map(|m| m.as_str()));
    w.token(p.env_map_encoding.as_str());
    w.flag(p.env_map_cube_uv);
    w.flag(p.light_map);
    w.flag(p.ao_map);
    w.flag(p.emissive_map);
    w.token(p.emissive_map_encoding.as_str());
    w.flag(p.bump_map);
    w.flag(p.normal_map);
    w.flag(p.displacement_map);
    w.flag(p.specular_map);
    w.flag(p.roughness_map);
    w.flag(p.metalness_map);
    w.flag(p.gradient_map);
    w.flag(p.alpha_map);
    w.opt(p.combine.map(|c| c.as_str()));
    w.token(p.vertex_colors.as_str());
    w.flag(p.fog);
    w.flag(p.use_fog);
    w.flag(p.fog_exp);
    w.flag(p.flat_shading);
    w.flag(p.size_attenuation);
    w.flag(p.logarithmic_depth_buffer);
    w.flag(p.skinning);
    w.uint(p.max_bones);
    w.flag(p.use_vertex_texture);
    w.flag(p.morph_targets);
    w.flag(p.morph_normals);
    w.uint(p.max_morph_targets);
    w.uint(p.max_morph_normals);
    w.flag(p.premultiplied_alpha);
    w.uint(p.num_dir_lights);
    w.uint(p.num_point_lights);
    w.uint(p.num_spot_lights);
    w.uint(p.num_hemi_lights);
    w.uint(p.num_rect_area_lights);
    w.flag(p.shadow_map_enabled);
    w.token(p.shadow_map_type.as_str());
    w.token(p.tone_mapping.as_str());
    w.flag(p.physically_correct_lights);
    w.float(p.alpha_test);
    w.flag(p.double_sided);
    w.flag(p.flip_sided);
    w.uint(p.num_clipping_planes);
    w.uint(p.num_clip_intersection);
    w.opt(p.depth_packing.map(|d| d.as_str()));
    w.flag(p.dithering);
}

// ─── Writer ──────────────────────────────────────────────────────────────────

struct KeyWriter {
    buf: String,
}

impl KeyWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Closed-vocabulary token. Must not contain `,` or `:`.
    fn token(&mut self, token: &str) {
        debug_assert!(!token.contains([',', ':']), "invalid key token {token:?}");
        self.buf.push_str(token);
        self.buf.push(',');
    }

    /// Length-prefixed free text.
    fn text(&mut self, text: &str) {
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{}:{text},", text.len());
    }

    /// Free text that may be absent. `-` cannot collide with a
    /// length-prefixed entry.
    fn opt_text(&mut self, text: Option<&str>) {
        match text {
            Some(text) => self.text(text),
            None => self.token("-"),
        }
    }

    fn flag(&mut self, value: bool) {
        self.token(if value { "1" } else { "0" });
    }

    fn uint(&mut self, value: u32) {
        let _ = write!(self.buf, "{value},");
    }

    /// Signed zeros and NaN payloads are folded so equal records write
    /// equal text.
    fn float(&mut self, value: f32) {
        let value = if value == 0.0 || value.is_nan() {
            0.0
        } else {
            value
        };
        let _ = write!(self.buf, "{value},");
    }

    fn opt(&mut self, value: Option<&str>) {
        self.token(value.unwrap_or("-"));
    }

    fn finish(self) -> String {
        self.buf
    }
}
