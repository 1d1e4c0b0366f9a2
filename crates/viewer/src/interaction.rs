//! Pointer interaction: hover and selection of parts.
//!
//! The controller keeps its own bookkeeping beside the scene instead of on
//! the renderables:
//! - `altered`: renderables currently showing feedback, with the material to
//!   restore and the feedback instance applied on top,
//! - `animations`: one scale animation slot per renderable. Writing a new
//!   target replaces the slot, so hover and click never fight over scale.
//!
//! Appearance is derived from state: a selected renderable shows selection
//! feedback, a hovered one shows hover feedback, anything else its original
//! material. The original is restored only once neither slot references the
//! renderable.

use std::collections::HashMap;

use glam::Vec2;

use crate::material::{Material, MaterialId, MaterialStore};
use crate::scene::{Part, RenderableId, Scene};
use crate::settings::InteractionSettings;
use crate::tween::{Easing, Tween};
use crate::viewport::camera::PerspectiveCamera;
use crate::viewport::picking::pick_part;

/// Cursor the shell should show over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

impl CursorHint {
    /// CSS cursor name
    pub fn css(&self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Pointer => "pointer",
        }
    }
}

/// Hovered and selected part indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub hovered: Option<usize>,
    pub selected: Option<usize>,
}

impl InteractionState {
    /// Part the info panel should describe
    pub fn relevant(&self) -> Option<usize> {
        self.hovered.or(self.selected)
    }
}

/// Mutable view of the scene lent to the controller for one call
pub struct SceneAccess<'a> {
    pub parts: &'a [Part],
    pub scene: &'a mut Scene,
    pub materials: &'a mut MaterialStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feedback {
    Hover,
    Selection,
}

struct Altered {
    original: MaterialId,
    instance: MaterialId,
    feedback: Feedback,
}

enum ScaleAnimation {
    Tween { tween: Tween<f32>, then_pulse: bool },
    Pulse { phase: f32 },
}

/// Feedback material templates owned by one controller. Each use clones a
/// template into a per-renderable instance.
pub struct FeedbackMaterials {
    hover: MaterialId,
    selection: MaterialId,
    disposed: bool,
}

impl FeedbackMaterials {
    pub fn new(materials: &mut MaterialStore, settings: &InteractionSettings) -> Self {
        Self {
            hover: materials.insert(Material::feedback("hover", settings.hover_color)),
            selection: materials.insert(Material::feedback("selection", settings.selection_color)),
            disposed: false,
        }
    }

    fn template(&self, feedback: Feedback) -> MaterialId {
        match feedback {
            Feedback::Hover => self.hover,
            Feedback::Selection => self.selection,
        }
    }

    /// Release both templates. Returns `false` when already released.
    pub fn dispose(&mut self, materials: &mut MaterialStore) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        materials.dispose(self.hover);
        materials.dispose(self.selection);
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

type ChangeCallback = Box<dyn FnMut(Option<&Part>)>;

pub struct InteractionController {
    settings: InteractionSettings,
    feedback: FeedbackMaterials,
    state: InteractionState,
    altered: HashMap<RenderableId, Altered>,
    animations: HashMap<RenderableId, ScaleAnimation>,
    cursor: CursorHint,
    on_change: Option<ChangeCallback>,
}

impl InteractionController {
    pub fn new(settings: InteractionSettings, materials: &mut MaterialStore) -> Self {
        let feedback = FeedbackMaterials::new(materials, &settings);
        Self {
            settings,
            feedback,
            state: InteractionState::default(),
            altered: HashMap::new(),
            animations: HashMap::new(),
            cursor: CursorHint::Default,
            on_change: None,
        }
    }

    /// Called with the relevant part (hovered, else selected) after every
    /// hover or selection change
    pub fn set_on_change(&mut self, callback: impl FnMut(Option<&Part>) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn hovered(&self) -> Option<usize> {
        self.state.hovered
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected
    }

    pub fn hovered_part<'p>(&self, parts: &'p [Part]) -> Option<&'p Part> {
        self.state.hovered.and_then(|i| parts.get(i))
    }

    pub fn selected_part<'p>(&self, parts: &'p [Part]) -> Option<&'p Part> {
        self.state.selected.and_then(|i| parts.get(i))
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn is_altered(&self, id: RenderableId) -> bool {
        self.altered.contains_key(&id)
    }

    pub fn altered_count(&self) -> usize {
        self.altered.len()
    }

    /// Material that will be restored when `id` loses all feedback
    pub fn original_material(&self, id: RenderableId) -> Option<MaterialId> {
        self.altered.get(&id).map(|a| a.original)
    }

    pub fn is_pulsing(&self, id: RenderableId) -> bool {
        matches!(
            self.animations.get(&id),
            Some(ScaleAnimation::Pulse { .. })
                | Some(ScaleAnimation::Tween {
                    then_pulse: true,
                    ..
                })
        )
    }

    /// Number of renderables with a running scale animation
    pub fn active_animations(&self) -> usize {
        self.animations.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.feedback.is_disposed()
    }

    // ── Pointer events ───────────────────────────────────────

    pub fn pointer_move(
        &mut self,
        ndc: Vec2,
        camera: &PerspectiveCamera,
        ctx: &mut SceneAccess<'_>,
        now: f64,
    ) {
        if self.is_disposed() {
            return;
        }
        let hit = pick_part(&camera.screen_ray(ndc), ctx.parts, ctx.scene).map(|h| h.part_index);
        self.cursor = if hit.is_some() {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        };
        if hit == self.state.hovered {
            return;
        }

        let before = self.state;
        self.clear_hover(ctx, now);
        if let Some(index) = hit {
            self.state.hovered = Some(index);
            self.refresh(index, ctx, now);
            tracing::debug!("Hover {}", ctx.parts[index].id);
        }
        self.notify(before, ctx.parts);
    }

    pub fn pointer_click(
        &mut self,
        ndc: Vec2,
        camera: &PerspectiveCamera,
        ctx: &mut SceneAccess<'_>,
        now: f64,
    ) {
        if self.is_disposed() {
            return;
        }
        match pick_part(&camera.screen_ray(ndc), ctx.parts, ctx.scene) {
            Some(hit) => self.select_part(hit.part_index, ctx, now),
            None => self.clear_selection(ctx, now),
        }
    }

    /// Select a part by index, as a click on it would
    pub fn select_part(&mut self, index: usize, ctx: &mut SceneAccess<'_>, now: f64) {
        if self.is_disposed() || index >= ctx.parts.len() {
            return;
        }
        let before = self.state;
        self.clear_selection_silent(ctx, now);
        self.state.selected = Some(index);
        self.refresh(index, ctx, now);
        tracing::debug!("Select {}", ctx.parts[index].id);
        self.notify(before, ctx.parts);
    }

    pub fn clear_selection(&mut self, ctx: &mut SceneAccess<'_>, now: f64) {
        let before = self.state;
        self.clear_selection_silent(ctx, now);
        self.notify(before, ctx.parts);
    }

    /// The pointer left the canvas
    pub fn pointer_leave(&mut self, ctx: &mut SceneAccess<'_>, now: f64) {
        let before = self.state;
        self.clear_hover(ctx, now);
        self.cursor = CursorHint::Default;
        self.notify(before, ctx.parts);
    }

    // ── Per-frame update ─────────────────────────────────────

    /// Advance scale animations and drive emissive intensity of altered parts
    pub fn frame_tick(&mut self, ctx: &mut SceneAccess<'_>, now: f64) {
        let settings = &self.settings;
        let scene = &mut *ctx.scene;

        self.animations.retain(|id, anim| {
            let mut keep = true;
            let mut start_pulse = false;
            let scale = match anim {
                ScaleAnimation::Tween { tween, then_pulse } => {
                    if tween.is_finished(now) {
                        start_pulse = *then_pulse;
                        keep = *then_pulse;
                    }
                    tween.sample(now)
                }
                ScaleAnimation::Pulse { phase } => {
                    *phase += settings.pulse_step;
                    settings.select_scale + settings.pulse_amplitude * phase.sin()
                }
            };
            if start_pulse {
                *anim = ScaleAnimation::Pulse { phase: 0.0 };
            }
            if let Some(r) = scene.get_mut(*id) {
                r.scale = scale;
            }
            keep
        });

        let intensity = settings.emissive_base
            + settings.emissive_amplitude * (settings.emissive_frequency * now as f32).sin();
        for altered in self.altered.values() {
            if let Some(emissive) = ctx
                .materials
                .get_mut(altered.instance)
                .and_then(|m| m.emissive.as_mut())
            {
                emissive.intensity = intensity;
            }
        }
    }

    /// Restore every altered renderable and release the feedback materials.
    /// Safe to call more than once.
    pub fn dispose(&mut self, scene: &mut Scene, materials: &mut MaterialStore) {
        if self.feedback.is_disposed() {
            return;
        }
        for (id, altered) in self.altered.drain() {
            if let Some(r) = scene.get_mut(id) {
                r.material = altered.original;
                r.scale = 1.0;
            }
            materials.dispose(altered.instance);
        }
        // Parts tweening back after un-hover are no longer altered
        for id in self.animations.keys() {
            if let Some(r) = scene.get_mut(*id) {
                r.scale = 1.0;
            }
        }
        self.animations.clear();
        self.state = InteractionState::default();
        self.cursor = CursorHint::Default;
        self.feedback.dispose(materials);
        tracing::debug!("Interaction controller disposed");
    }

    // ── Internals ────────────────────────────────────────────

    fn clear_hover(&mut self, ctx: &mut SceneAccess<'_>, now: f64) {
        if let Some(index) = self.state.hovered.take() {
            self.refresh(index, ctx, now);
        }
    }

    fn clear_selection_silent(&mut self, ctx: &mut SceneAccess<'_>, now: f64) {
        if let Some(index) = self.state.selected.take() {
            self.refresh(index, ctx, now);
        }
    }

    fn wanted_feedback(&self, index: usize) -> Option<Feedback> {
        if self.state.selected == Some(index) {
            Some(Feedback::Selection)
        } else if self.state.hovered == Some(index) {
            Some(Feedback::Hover)
        } else {
            None
        }
    }

    /// Bring one part's appearance in line with the hover/selection slots
    fn refresh(&mut self, index: usize, ctx: &mut SceneAccess<'_>, now: f64) {
        let Some(part) = ctx.parts.get(index) else {
            return;
        };
        let id = part.renderable;
        let wanted = self.wanted_feedback(index);
        let current = self.altered.get(&id).map(|a| a.feedback);
        if wanted == current {
            return;
        }
        let Some(renderable) = ctx.scene.get_mut(id) else {
            return;
        };

        match wanted {
            None => {
                if let Some(altered) = self.altered.remove(&id) {
                    renderable.material = altered.original;
                    ctx.materials.dispose(altered.instance);
                }
                let tween = Tween::new(renderable.scale, 1.0, self.settings.hover_duration, now)
                    .with_easing(Easing::EaseOutQuad);
                self.animations.insert(
                    id,
                    ScaleAnimation::Tween {
                        tween,
                        then_pulse: false,
                    },
                );
            }
            Some(feedback) => {
                let Some(instance) = ctx
                    .materials
                    .clone_material(self.feedback.template(feedback))
                else {
                    return;
                };
                let original = match self.altered.remove(&id) {
                    Some(previous) => {
                        ctx.materials.dispose(previous.instance);
                        previous.original
                    }
                    None => renderable.material,
                };
                renderable.material = instance;
                self.altered.insert(
                    id,
                    Altered {
                        original,
                        instance,
                        feedback,
                    },
                );

                let (scale, duration, then_pulse) = match feedback {
                    Feedback::Hover => (
                        self.settings.hover_scale,
                        self.settings.hover_duration,
                        false,
                    ),
                    Feedback::Selection => (
                        self.settings.select_scale,
                        self.settings.select_duration,
                        true,
                    ),
                };
                let tween = Tween::new(renderable.scale, scale, duration, now)
                    .with_easing(Easing::EaseOutQuad);
                self.animations
                    .insert(id, ScaleAnimation::Tween { tween, then_pulse });
            }
        }
    }

    fn notify(&mut self, before: InteractionState, parts: &[Part]) {
        if before == self.state {
            return;
        }
        if let Some(callback) = self.on_change.as_mut() {
            callback(self.state.relevant().and_then(|i| parts.get(i)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::fixtures;
    use crate::scene::{build_scene, BuiltScene};

    const FRAME: f64 = 1.0 / 60.0;

    struct Rig {
        built: BuiltScene,
        materials: MaterialStore,
        camera: PerspectiveCamera,
        ctrl: InteractionController,
        now: f64,
    }

    impl Rig {
        /// Three boxes in a row at x = -2, 0, 2, seen from +Z
        fn new() -> Self {
            let mut materials = MaterialStore::new();
            let built = build_scene(&fixtures::row_catalog(), &mut materials).unwrap();
            let ctrl = InteractionController::new(InteractionSettings::default(), &mut materials);
            Self {
                built,
                materials,
                camera: fixtures::camera_facing_origin(),
                ctrl,
                now: 0.0,
            }
        }

        fn ndc_of(&self, index: usize) -> Vec2 {
            let part = &self.built.parts[index];
            let pos = self.built.scene.get(part.renderable).unwrap().position;
            self.camera.project(pos).unwrap()
        }

        fn with_ctx<R>(&mut self, f: impl FnOnce(&mut InteractionController, &PerspectiveCamera, &mut SceneAccess<'_>, f64) -> R) -> R {
            let mut ctx = SceneAccess {
                parts: &self.built.parts,
                scene: &mut self.built.scene,
                materials: &mut self.materials,
            };
            f(&mut self.ctrl, &self.camera, &mut ctx, self.now)
        }

        fn hover(&mut self, index: usize) {
            let ndc = self.ndc_of(index);
            self.with_ctx(|c, cam, ctx, now| c.pointer_move(ndc, cam, ctx, now));
        }

        fn hover_nothing(&mut self) {
            self.with_ctx(|c, cam, ctx, now| c.pointer_move(Vec2::new(0.0, 0.95), cam, ctx, now));
        }

        fn click(&mut self, index: usize) {
            let ndc = self.ndc_of(index);
            self.with_ctx(|c, cam, ctx, now| c.pointer_click(ndc, cam, ctx, now));
        }

        fn click_nothing(&mut self) {
            self.with_ctx(|c, cam, ctx, now| c.pointer_click(Vec2::new(0.0, 0.95), cam, ctx, now));
        }

        fn frames(&mut self, n: usize) {
            for _ in 0..n {
                self.now += FRAME;
                self.with_ctx(|c, _, ctx, now| c.frame_tick(ctx, now));
            }
        }

        fn renderable(&self, index: usize) -> RenderableId {
            self.built.parts[index].renderable
        }

        fn material_of(&self, index: usize) -> MaterialId {
            self.built.scene.get(self.renderable(index)).unwrap().material
        }

        fn scale_of(&self, index: usize) -> f32 {
            self.built.scene.get(self.renderable(index)).unwrap().scale
        }

        fn color_of(&self, index: usize) -> [f32; 3] {
            self.materials.get(self.material_of(index)).unwrap().color
        }
    }

    #[test]
    fn test_miss_leaves_no_hover_and_default_cursor() {
        let mut rig = Rig::new();
        rig.hover_nothing();
        assert_eq!(rig.ctrl.hovered(), None);
        assert_eq!(rig.ctrl.cursor(), CursorHint::Default);
        assert_eq!(rig.ctrl.altered_count(), 0);
    }

    #[test]
    fn test_hover_applies_feedback_and_scales_up() {
        let mut rig = Rig::new();
        let original = rig.material_of(1);
        rig.hover(1);
        assert_eq!(rig.ctrl.hovered(), Some(1));
        assert_eq!(rig.ctrl.cursor(), CursorHint::Pointer);
        assert!(rig.ctrl.is_altered(rig.renderable(1)));
        assert_ne!(rig.material_of(1), original);
        assert_eq!(rig.ctrl.original_material(rig.renderable(1)), Some(original));
        assert_eq!(rig.color_of(1), InteractionSettings::default().hover_color);

        rig.frames(15); // 0.25 s > 0.2 s
        assert!((rig.scale_of(1) - 1.05).abs() < 1e-6);
        assert_eq!(rig.ctrl.active_animations(), 0);
    }

    #[test]
    fn test_hover_a_then_b_restores_a() {
        let mut rig = Rig::new();
        let original_a = rig.material_of(0);
        rig.hover(0);
        let hover_instance = rig.material_of(0);
        rig.hover(2);
        assert_eq!(rig.ctrl.hovered(), Some(2));
        assert_eq!(rig.material_of(0), original_a);
        assert!(!rig.ctrl.is_altered(rig.renderable(0)));
        assert!(rig.ctrl.is_altered(rig.renderable(2)));
        assert_eq!(rig.ctrl.altered_count(), 1);
        // The clone used for A was released
        assert!(!rig.materials.is_live(hover_instance));

        rig.frames(15);
        assert!((rig.scale_of(0) - 1.0).abs() < 1e-6);
        assert!((rig.scale_of(2) - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_unhover_restores_original() {
        let mut rig = Rig::new();
        let original = rig.material_of(1);
        rig.hover(1);
        rig.frames(5);
        rig.hover_nothing();
        assert_eq!(rig.material_of(1), original);
        assert_eq!(rig.ctrl.cursor(), CursorHint::Default);
        rig.frames(15);
        assert!((rig.scale_of(1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_selection_survives_moving_away() {
        let mut rig = Rig::new();
        let original = rig.material_of(1);
        rig.hover(1);
        rig.click(1);
        rig.frames(10);
        rig.hover_nothing();
        rig.frames(30);

        assert_eq!(rig.ctrl.hovered(), None);
        assert_eq!(rig.ctrl.selected(), Some(1));
        assert!(rig.ctrl.is_altered(rig.renderable(1)));
        assert_ne!(rig.material_of(1), original);
        assert_eq!(rig.color_of(1), InteractionSettings::default().selection_color);
        assert!(rig.ctrl.is_pulsing(rig.renderable(1)));
        assert!(rig.scale_of(1) > 1.07);
        // Original still remembered for when the selection goes away
        assert_eq!(rig.ctrl.original_material(rig.renderable(1)), Some(original));
    }

    #[test]
    fn test_hover_does_not_override_selection() {
        let mut rig = Rig::new();
        rig.click(1);
        let selected_material = rig.material_of(1);
        rig.hover(1);
        assert_eq!(rig.material_of(1), selected_material);
        assert_eq!(rig.ctrl.cursor(), CursorHint::Pointer);
        assert!(rig.ctrl.is_pulsing(rig.renderable(1)));
    }

    #[test]
    fn test_clear_selection_while_hovered_returns_to_hover() {
        let mut rig = Rig::new();
        rig.hover(1);
        rig.click(1);
        rig.frames(40);
        rig.with_ctx(|c, _, ctx, now| c.clear_selection(ctx, now));
        assert_eq!(rig.color_of(1), InteractionSettings::default().hover_color);
        assert!(!rig.ctrl.is_pulsing(rig.renderable(1)));
        rig.frames(15);
        assert!((rig.scale_of(1) - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_repeated_click_keeps_single_pulse() {
        let mut rig = Rig::new();
        for _ in 0..5 {
            rig.click(1);
            rig.frames(25);
        }
        assert_eq!(rig.ctrl.active_animations(), 1);
        assert!(rig.ctrl.is_pulsing(rig.renderable(1)));
        assert_eq!(rig.ctrl.altered_count(), 1);
        // Two templates, one per-part material each, one selection instance
        assert_eq!(rig.materials.live_count(), 2 + 3 + 1);
    }

    #[test]
    fn test_pulse_oscillates_around_select_scale() {
        let mut rig = Rig::new();
        rig.click(0);
        rig.frames(20); // tween done, pulsing
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..80 {
            rig.frames(1);
            min = min.min(rig.scale_of(0));
            max = max.max(rig.scale_of(0));
        }
        assert!(max <= 1.12 + 1e-5 && max > 1.115);
        assert!(min >= 1.08 - 1e-5 && min < 1.085);
    }

    #[test]
    fn test_click_empty_clears_selection() {
        let mut rig = Rig::new();
        let original = rig.material_of(2);
        rig.click(2);
        rig.frames(30);
        rig.click_nothing();
        assert_eq!(rig.ctrl.selected(), None);
        assert_eq!(rig.material_of(2), original);
        rig.frames(15);
        assert!((rig.scale_of(2) - 1.0).abs() < 1e-6);
        assert_eq!(rig.ctrl.active_animations(), 0);
    }

    #[test]
    fn test_select_other_part_moves_selection() {
        let mut rig = Rig::new();
        let original_0 = rig.material_of(0);
        rig.click(0);
        rig.click(2);
        assert_eq!(rig.ctrl.selected(), Some(2));
        assert_eq!(rig.material_of(0), original_0);
        assert!(!rig.ctrl.is_pulsing(rig.renderable(0)));
        assert!(rig.ctrl.is_pulsing(rig.renderable(2)));
    }

    #[test]
    fn test_hover_then_click_supersedes_scale_tween() {
        let mut rig = Rig::new();
        rig.hover(1);
        rig.frames(3);
        rig.click(1);
        assert_eq!(rig.ctrl.active_animations(), 1);
        rig.frames(25);
        // Reached the selection target, not stuck at the hover target
        assert!(rig.scale_of(1) > 1.07);
    }

    #[test]
    fn test_emissive_follows_sinusoid() {
        let mut rig = Rig::new();
        rig.hover(0);
        rig.click(2);
        rig.frames(7);
        let s = InteractionSettings::default();
        let expected = s.emissive_base + s.emissive_amplitude * (s.emissive_frequency * rig.now as f32).sin();
        for index in [0, 2] {
            let m = rig.materials.get(rig.material_of(index)).unwrap();
            let e = m.emissive.unwrap();
            assert!((e.intensity - expected).abs() < 1e-6);
        }
        // Untouched part keeps its non-emissive material
        assert!(!rig.materials.get(rig.material_of(1)).unwrap().is_emissive());
    }

    #[test]
    fn test_callback_reports_relevant_part() {
        let mut rig = Rig::new();
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let sink = seen.clone();
        rig.ctrl
            .set_on_change(move |p| sink.borrow_mut().push(p.map(|p| p.id.clone())));

        rig.hover(0);
        rig.hover(0); // no change
        rig.click(0);
        rig.hover_nothing();
        rig.click_nothing();

        let seen = seen.borrow();
        let ids: Vec<Option<&str>> = seen.iter().map(|s| s.as_deref()).collect();
        assert_eq!(
            ids,
            vec![Some("box_left"), Some("box_left"), Some("box_left"), None]
        );
    }

    #[test]
    fn test_dispose_is_idempotent_and_restores() {
        let mut rig = Rig::new();
        let original = rig.material_of(1);
        rig.click(1);
        rig.frames(5);
        let live_before = rig.materials.live_count();
        rig.ctrl.dispose(&mut rig.built.scene, &mut rig.materials);
        assert_eq!(rig.materials.live_count(), live_before - 3);
        assert_eq!(rig.material_of(1), original);
        assert_eq!(rig.scale_of(1), 1.0);

        rig.ctrl.dispose(&mut rig.built.scene, &mut rig.materials);
        assert_eq!(rig.materials.live_count(), live_before - 3);

        // Events after teardown are ignored
        rig.click(0);
        assert_eq!(rig.ctrl.selected(), None);
    }

    #[test]
    fn test_dispose_mid_unhover_tween_resets_scale() {
        let mut rig = Rig::new();
        rig.hover(0);
        rig.frames(20);
        rig.hover_nothing();
        rig.frames(3);
        assert!(rig.scale_of(0) > 1.0);
        assert!(!rig.ctrl.is_altered(rig.renderable(0)));

        rig.ctrl.dispose(&mut rig.built.scene, &mut rig.materials);
        rig.frames(30);
        assert_eq!(rig.scale_of(0), 1.0);
        assert_eq!(rig.ctrl.active_animations(), 0);
    }
}
