use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::geometry::Point;
use super::{WidgetId, WidgetTree};

/// Easing function for animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Constant speed interpolation.
    Linear,
    /// Cubic ease-in-out: slow start, fast middle, slow end.
    EaseInOut,
    /// Cubic ease-out: fast start, slow end (deceleration).
    EaseOut,
    /// `t^e`: values above 1 start slow, below 1 start fast.
    Power(f32),
}

/// Layout input an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Fixed width request.
    Width,
    /// Fixed height request.
    Height,
    /// Position of an undocked widget.
    X,
    Y,
}

/// A single timed animation of one widget property.
#[derive(Debug, Clone)]
struct Animation {
    /// Captured from the widget when the animation starts running.
    from: Option<f32>,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Animation {
    /// Eased progress in [0, 1], `None` while still delayed.
    fn progress(&self, now: Instant) -> Option<f32> {
        if now < self.start {
            return None;
        }
        let elapsed = now.duration_since(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return Some(1.0);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Some(ease(t, self.easing))
    }

    fn is_finished(&self, now: Instant) -> bool {
        now >= self.start && (self.duration.is_zero() || now.duration_since(self.start) >= self.duration)
    }
}

/// Time-driven property animations keyed by (widget, property).
///
/// Animations tick on wall-clock time (`Instant`). The canvas calls
/// `think` once per frame before layout; each call writes the current
/// value into the tree and drops animations that finished or whose widget
/// is gone. Starting an animation on a (widget, property) pair that is
/// already animating replaces it.
#[derive(Debug, Default)]
pub struct Animator {
    animations: HashMap<(WidgetId, AnimatedProperty), Animation>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate `property` of `id` towards `to` over `duration`, starting
    /// after `delay`. The start value is read from the widget when the
    /// delay has passed.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        &mut self,
        id: WidgetId,
        property: AnimatedProperty,
        to: i32,
        duration: Duration,
        delay: Duration,
        easing: Easing,
        now: Instant,
    ) {
        self.animations.insert(
            (id, property),
            Animation {
                from: None,
                to: to as f32,
                start: now + delay,
                duration,
                easing,
            },
        );
    }

    /// Drop every animation of `id`.
    pub fn cancel(&mut self, id: WidgetId) {
        self.animations.retain(|(wid, _), _| *wid != id);
    }

    pub fn is_animating(&self, id: WidgetId) -> bool {
        self.animations.keys().any(|(wid, _)| *wid == id)
    }

    /// Number of pending or running animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// The target value of an animation, if it exists.
    pub fn target(&self, id: WidgetId, property: AnimatedProperty) -> Option<i32> {
        self.animations.get(&(id, property)).map(|a| a.to as i32)
    }

    /// Advance every animation to `now`, writing values into `tree`.
    /// Returns how many properties were updated.
    pub fn think(&mut self, tree: &mut WidgetTree, now: Instant) -> usize {
        let mut applied = 0;
        self.animations.retain(|&(id, property), anim| {
            let Some(current) = read_property(tree, id, property) else {
                return false;
            };
            let Some(progress) = anim.progress(now) else {
                return true;
            };
            let from = *anim.from.get_or_insert(current as f32);
            let value = (from + (anim.to - from) * progress).round() as i32;
            if value != current {
                write_property(tree, id, property, value);
                applied += 1;
            }
            !anim.is_finished(now)
        });
        applied
    }
}

fn read_property(tree: &WidgetTree, id: WidgetId, property: AnimatedProperty) -> Option<i32> {
    let node = tree.get(id)?;
    Some(match property {
        AnimatedProperty::Width => node.width.unwrap_or(node.bounds.width),
        AnimatedProperty::Height => node.height.unwrap_or(node.bounds.height),
        AnimatedProperty::X => node.position.x,
        AnimatedProperty::Y => node.position.y,
    })
}

fn write_property(tree: &mut WidgetTree, id: WidgetId, property: AnimatedProperty, value: i32) {
    let position = tree.get(id).map(|n| n.position).unwrap_or(Point::ZERO);
    let result = match property {
        AnimatedProperty::Width => tree.set_width(id, Some(value)),
        AnimatedProperty::Height => tree.set_height(id, Some(value)),
        AnimatedProperty::X => tree.set_position(id, Point::new(value, position.y)),
        AnimatedProperty::Y => tree.set_position(id, Point::new(position.x, value)),
    };
    if let Err(e) = result {
        log::warn!("animation of {id:?} failed: {e}");
    }
}

/// Apply an easing function to a linear progress value `t` in [0, 1].
fn ease(t: f32, easing: Easing) -> f32 {
    match easing {
        Easing::Linear => t,
        Easing::EaseInOut => {
            // Cubic ease-in-out: 4t³ for t<0.5, 1-(-2t+2)³/2 for t>=0.5
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let f = -2.0 * t + 2.0;
                1.0 - f * f * f / 2.0
            }
        }
        Easing::EaseOut => {
            // Cubic ease-out: 1-(1-t)³
            let f = 1.0 - t;
            1.0 - f * f * f
        }
        Easing::Power(e) => t.powf(e),
    }
}
