//! Shared data records.

/// Hit points. Unlike a clamped health bar this can go below zero: a lethal
/// hit leaves the overkill visible until the owner sweeps the entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`. Negative amounts are ignored, health never goes up here.
    pub fn take_damage(&mut self, amount: f32) {
        if amount > 0.0 {
            self.current -= amount;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_lethal_damage_is_dead() {
        let mut h = Health::new(100.0);
        h.take_damage(100.0);
        assert!(h.is_dead());
        assert_eq!(h.current, 0.0);
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut h = Health::new(100.0);
        h.take_damage(30.0);
        h.take_damage(-50.0);
        assert_eq!(h.current, 70.0);
    }

    #[test]
    fn percentage_is_clamped() {
        let mut h = Health::new(50.0);
        h.take_damage(80.0);
        assert_eq!(h.percentage(), 0.0);
    }
}
