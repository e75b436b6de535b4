//! Totals and on-diet streaks over a meal history.

use super::Meal;

/// Aggregate figures for one user's meals.
///
/// Computed in a single pass over meals ordered by creation time, so all four
/// values always describe the same snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealMetrics {
    total_meals: u64,
    total_on_diet: u64,
    total_off_diet: u64,
    best_sequence: u64,
}

impl MealMetrics {
    /// Summarise meals that are already ordered by creation time.
    pub fn from_history<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Self {
        Self::from_flags(meals.into_iter().map(Meal::is_on_diet))
    }

    /// Summarise a sequence of on-diet flags in creation order.
    ///
    /// # Examples
    /// ```
    /// use daily_diet::domain::MealMetrics;
    ///
    /// let metrics = MealMetrics::from_flags([true, true, false, true]);
    /// assert_eq!(metrics.total_meals(), 4);
    /// assert_eq!(metrics.best_sequence(), 2);
    /// ```
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        let mut metrics = Self::default();
        let mut current = 0_u64;

        for on_diet in flags {
            metrics.total_meals += 1;
            if on_diet {
                metrics.total_on_diet += 1;
                current += 1;
                metrics.best_sequence = metrics.best_sequence.max(current);
            } else {
                metrics.total_off_diet += 1;
                current = 0;
            }
        }

        metrics
    }

    pub fn total_meals(&self) -> u64 {
        self.total_meals
    }

    pub fn total_on_diet(&self) -> u64 {
        self.total_on_diet
    }

    pub fn total_off_diet(&self) -> u64 {
        self.total_off_diet
    }

    /// Longest run of consecutive on-diet meals.
    pub fn best_sequence(&self) -> u64 {
        self.best_sequence
    }
}
