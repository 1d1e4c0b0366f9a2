use glam::{Mat4, Vec3};
use glow::HasContext;

use super::mesh::{self, LineMeshData, MeshData, LINE_STRIDE, MESH_STRIDE};

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// Show grid
    pub grid_visible: bool,
    /// Background color RGB
    pub bg_color: [u8; 3],
    /// Camera position, for specular highlights
    pub eye: Vec3,
}

/// One renderable as the renderer sees it for a frame
#[derive(Clone, Debug)]
pub struct DrawItem {
    /// Index into the uploaded mesh list
    pub mesh: usize,
    pub model: Mat4,
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

// ── Upload queue ─────────────────────────────────────────────

/// Scene meshes waiting for a GL context. Cleared only by a successful
/// upload, so a paint that never runs or fails keeps them queued.
#[derive(Default)]
pub struct MeshQueue {
    pending: Option<Vec<MeshData>>,
}

impl MeshQueue {
    pub fn queue(&mut self, meshes: Vec<MeshData>) {
        self.pending = Some(meshes);
    }

    pub fn flush<E>(&mut self, upload: impl FnOnce(&[MeshData]) -> Result<(), E>) -> Result<(), E> {
        if let Some(meshes) = &self.pending {
            upload(meshes)?;
            self.pending = None;
        }
        Ok(())
    }
}

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

struct GpuLines {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

// ── Main GL renderer ─────────────────────────────────────────

pub struct GlRenderer {
    mesh_program: glow::Program,
    line_program: glow::Program,
    grid: GpuLines,
    /// Part meshes in scene order, uploaded once per session
    meshes: Vec<GpuMesh>,
    queue: MeshQueue,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let mesh_program = compile_program(gl, MESH_VERT, MESH_FRAG)?;
        let line_program = compile_program(gl, LINE_VERT, LINE_FRAG)?;
        let grid = upload_lines(gl, &mesh::grid(6, 0.5, 0.5))?;

        Ok(Self {
            mesh_program,
            line_program,
            grid,
            meshes: Vec::new(),
            queue: MeshQueue::default(),
        })
    }

    /// Queue scene meshes; they replace the current ones on the next paint
    pub fn queue_meshes(&mut self, meshes: Vec<MeshData>) {
        self.queue.queue(meshes);
    }

    fn upload_meshes(
        meshes: &mut Vec<GpuMesh>,
        gl: &glow::Context,
        data: &[MeshData],
    ) -> Result<(), String> {
        delete_meshes(gl, meshes);
        for mesh in data {
            meshes.push(upload_mesh(gl, mesh)?);
        }
        tracing::debug!("Uploaded {} meshes", meshes.len());
        Ok(())
    }

    /// Upload queued meshes, then render the scene
    pub fn paint(
        &mut self,
        gl: &glow::Context,
        view_projection: &Mat4,
        items: &[DrawItem],
        params: &RenderParams,
    ) {
        let meshes = &mut self.meshes;
        if let Err(e) = self
            .queue
            .flush(|data| Self::upload_meshes(meshes, gl, data))
        {
            tracing::error!("Mesh upload failed: {e}");
        }

        unsafe {
            gl.viewport(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.scissor(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.enable(glow::SCISSOR_TEST);

            gl.clear_color(
                params.bg_color[0] as f32 / 255.0,
                params.bg_color[1] as f32 / 255.0,
                params.bg_color[2] as f32 / 255.0,
                1.0,
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            if params.grid_visible {
                gl.use_program(Some(self.line_program));
                set_uniform_mat4(gl, self.line_program, "u_mvp", view_projection);
                gl.enable(glow::BLEND);
                gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
                draw_lines(gl, &self.grid);
                gl.disable(glow::BLEND);
            }

            gl.use_program(Some(self.mesh_program));
            set_uniform_mat4(gl, self.mesh_program, "u_view_proj", view_projection);

            // Light direction in world space
            let light_dir = Vec3::new(0.4, 0.9, 0.6).normalize();
            set_uniform_vec3(gl, self.mesh_program, "u_light_dir", light_dir.to_array());
            set_uniform_vec3(gl, self.mesh_program, "u_eye", params.eye.to_array());

            for item in items {
                let Some(mesh) = self.meshes.get(item.mesh) else {
                    continue;
                };
                set_uniform_mat4(gl, self.mesh_program, "u_model", &item.model);
                set_uniform_vec3(gl, self.mesh_program, "u_color", item.color);
                set_uniform_f32(gl, self.mesh_program, "u_roughness", item.roughness);
                set_uniform_f32(gl, self.mesh_program, "u_metalness", item.metalness);
                set_uniform_vec3(gl, self.mesh_program, "u_emissive", item.emissive);
                set_uniform_f32(
                    gl,
                    self.mesh_program,
                    "u_emissive_intensity",
                    item.emissive_intensity,
                );
                draw_mesh(gl, mesh);
            }

            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        delete_meshes(gl, &mut self.meshes);
        unsafe {
            gl.delete_program(self.mesh_program);
            gl.delete_program(self.line_program);
            gl.delete_vertex_array(self.grid.vao);
            gl.delete_buffer(self.grid.vbo);
        }
    }
}

fn delete_meshes(gl: &glow::Context, meshes: &mut Vec<GpuMesh>) {
    for mesh in meshes.drain(..) {
        unsafe {
            gl.delete_vertex_array(mesh.vao);
            gl.delete_buffer(mesh.vbo);
            gl.delete_buffer(mesh.ibo);
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> Result<GpuMesh, String> {
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = (MESH_STRIDE * 4) as i32;
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);

        let ibo = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            cast_slice(&data.indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            vbo,
            ibo,
            index_count: data.indices.len() as i32,
        })
    }
}

fn upload_lines(gl: &glow::Context, data: &LineMeshData) -> Result<GpuLines, String> {
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = (LINE_STRIDE * 4) as i32;
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // color: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 4, glow::FLOAT, false, stride, 3 * 4);

        gl.bind_vertex_array(None);

        Ok(GpuLines {
            vao,
            vbo,
            vertex_count: data.vertex_count() as i32,
        })
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

unsafe fn draw_lines(gl: &glow::Context, lines: &GpuLines) {
    gl.bind_vertex_array(Some(lines.vao));
    gl.draw_arrays(glow::LINES, 0, lines.vertex_count);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program()?;
        let mut shaders = Vec::with_capacity(2);

        for (kind, src) in [(glow::VERTEX_SHADER, vert_src), (glow::FRAGMENT_SHADER, frag_src)] {
            let shader = gl.create_shader(kind)?;
            gl.shader_source(shader, src);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                return Err(format!("shader compile error: {}", gl.get_shader_info_log(shader)));
            }
            gl.attach_shader(program, shader);
            shaders.push(shader);
        }

        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            return Err(format!("program link error: {}", gl.get_program_info_log(program)));
        }

        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }

        Ok(program)
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: [f32; 3]) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v[0], v[1], v[2]);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, v: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), v);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice)) }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_view_proj;
uniform mat4 u_model;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

out vec3 v_normal;
out vec3 v_world;

void main() {
    gl_Position = u_view_proj * u_model * vec4(a_position, 1.0);
    // Uniform scale only, so the model matrix keeps normals perpendicular
    v_normal = mat3(u_model) * a_normal;
    v_world = (u_model * vec4(a_position, 1.0)).xyz;
}
"#;

const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_light_dir;
uniform vec3 u_eye;
uniform vec3 u_color;
uniform float u_roughness;
uniform float u_metalness;
uniform vec3 u_emissive;
uniform float u_emissive_intensity;

in vec3 v_normal;
in vec3 v_world;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    vec3 v = normalize(u_eye - v_world);
    vec3 h = normalize(u_light_dir + v);
    float diffuse = max(dot(n, u_light_dir), 0.0);
    float ambient = 0.3;

    // Blinn-Phong; rougher surfaces get a wider, dimmer highlight
    float shininess = mix(128.0, 4.0, clamp(u_roughness, 0.0, 1.0));
    float spec = pow(max(dot(n, h), 0.0), shininess) * (1.0 - 0.7 * u_roughness);
    // Metals tint the highlight and lose most of their diffuse term
    vec3 spec_color = mix(vec3(0.04), u_color, u_metalness);
    vec3 lit = u_color * (ambient + diffuse * 0.7) * (1.0 - 0.6 * u_metalness)
        + spec_color * spec;
    frag_color = vec4(lit + u_emissive * u_emissive_intensity, 1.0);
}
"#;

const LINE_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec4 a_color;

out vec4 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_color = a_color;
}
"#;

const LINE_FRAG: &str = r#"#version 330 core
in vec4 v_color;
out vec4 frag_color;

void main() {
    frag_color = v_color;
}
"#;
