use super::types::Effect;

/// The two ordered effect lists the scheduler walks each frame.
///
/// The persistent list is seeded at scene setup (typically polygon-scope
/// effects anchored in the world) and stays fixed; the transient list is
/// edited at runtime (push on command, pop last, clear). Insertion order is
/// render order within each list.
///
/// Merge policy (documented in DESIGN.md): the persistent list is consumed
/// fully first, then the transient list, each in insertion order. Every
/// persistent effect is therefore composited before any transient effect.
#[derive(Debug, Default)]
pub struct EffectLists {
    persistent: Vec<Effect>,
    transient: Vec<Effect>,
}

impl EffectLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the persistent list (scene-setup effects).
    pub fn push_persistent(&mut self, effect: Effect) {
        self.persistent.push(effect);
    }

    /// Appends to the transient list.
    pub fn push(&mut self, effect: Effect) {
        self.transient.push(effect);
    }

    /// Removes and returns the most recently pushed transient effect.
    /// A no-op returning `None` when the transient list is empty.
    pub fn pop_last(&mut self) -> Option<Effect> {
        self.transient.pop()
    }

    /// Clears the transient list. The persistent list is untouched.
    pub fn clear(&mut self) {
        self.transient.clear();
    }

    pub fn persistent_len(&self) -> usize {
        self.persistent.len()
    }

    pub fn transient_len(&self) -> usize {
        self.transient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persistent.is_empty() && self.transient.is_empty()
    }

    /// All effects in render order: persistent first, then transient.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Effect> {
        self.persistent.iter().chain(self.transient.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::types::EffectKind;

    fn kinds(lists: &EffectLists) -> Vec<EffectKind> {
        lists.iter_ordered().map(|e| e.kind).collect()
    }

    #[test]
    fn render_order_is_persistent_then_transient() {
        let mut lists = EffectLists::new();
        lists.push(Effect::fullscreen(EffectKind::Gradient));
        lists.push_persistent(Effect::fullscreen(EffectKind::HueShift));
        lists.push(Effect::fullscreen(EffectKind::BlurX));
        lists.push_persistent(Effect::fullscreen(EffectKind::Retro));

        assert_eq!(
            kinds(&lists),
            vec![
                EffectKind::HueShift,
                EffectKind::Retro,
                EffectKind::Gradient,
                EffectKind::BlurX,
            ]
        );
    }

    #[test]
    fn insertion_order_preserved_within_each_list() {
        let mut lists = EffectLists::new();
        for kind in [EffectKind::Tint, EffectKind::BlurX, EffectKind::BlurY] {
            lists.push(Effect::fullscreen(kind));
        }
        assert_eq!(
            kinds(&lists),
            vec![EffectKind::Tint, EffectKind::BlurX, EffectKind::BlurY]
        );
    }

    #[test]
    fn pop_last_on_empty_is_a_noop() {
        let mut lists = EffectLists::new();
        lists.push_persistent(Effect::fullscreen(EffectKind::Gradient));

        assert!(lists.pop_last().is_none());
        assert_eq!(lists.persistent_len(), 1);
    }

    #[test]
    fn pop_last_removes_newest_transient() {
        let mut lists = EffectLists::new();
        lists.push(Effect::fullscreen(EffectKind::Tint));
        lists.push(Effect::fullscreen(EffectKind::Outline));

        let popped = lists.pop_last().unwrap();
        assert_eq!(popped.kind, EffectKind::Outline);
        assert_eq!(lists.transient_len(), 1);
    }

    #[test]
    fn clear_leaves_persistent_list_alone() {
        let mut lists = EffectLists::new();
        lists.push_persistent(Effect::fullscreen(EffectKind::Underwater));
        lists.push(Effect::fullscreen(EffectKind::Bloom));
        lists.push(Effect::fullscreen(EffectKind::Retro));

        lists.clear();

        assert_eq!(lists.transient_len(), 0);
        assert_eq!(lists.persistent_len(), 1);
    }
}
