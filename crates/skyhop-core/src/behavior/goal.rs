//! Goals only animate; reaching one is a query made by the frame driver.

use crate::entity::GoalComponents;

/// Advances an animated flag.
pub fn update(goal: &mut GoalComponents) {
    if let Some(animator) = goal.animator.as_mut() {
        animator.animate("default");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::animation::{AnimatedKind, AnimationSet, Animator, FrameHandle};
    use crate::geometry::Rect;
    use crate::level::GoalKind;

    #[test]
    fn flag_cycles_default_sequence() {
        let set = AnimationSet::new().with("default", vec![FrameHandle(0), FrameHandle(1)]);
        let animator = Animator::new(AnimatedKind::Flag, Arc::new(set), 0.5).unwrap();
        let mut flag = GoalComponents {
            kind: GoalKind::Flag,
            rect: Rect::new(0, 0, 64, 64),
            animator: Some(animator),
        };

        update(&mut flag);
        update(&mut flag);
        let animator = flag.animator.as_ref().unwrap();
        assert_eq!(animator.displayed_index(), 1);
        assert_eq!(animator.frame(), Some(FrameHandle(1)));
    }

    #[test]
    fn flagpole_is_inert() {
        let mut pole = GoalComponents {
            kind: GoalKind::Flagpole,
            rect: Rect::new(0, 0, 64, 64),
            animator: None,
        };
        update(&mut pole);
        assert!(pole.animator.is_none());
    }
}
