// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::time::Duration;

/// Statistics collected during one safety check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafetyStatistics {
    /// Iterations of the search loop.
    pub steps: u64,
    /// Configurations removed from the frontier and expanded.
    pub configurations_expanded: u64,
    /// Transitions produced, including those dropped as duplicates.
    pub transitions_generated: u64,
    /// Expanded configurations from which no owner could proceed.
    pub dead_ends: u64,
    /// Transitions not enqueued because their configuration was seen before.
    pub duplicates_skipped: u64,
    /// Largest frontier size observed.
    pub peak_frontier_size: u64,
    /// Most owners completed along a single path.
    pub max_depth: u64,
    /// Total time spent in the checker.
    pub time_total: Duration,
}

impl SafetyStatistics {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_configuration_expanded(&mut self) {
        self.configurations_expanded = self.configurations_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_transition_generated(&mut self) {
        self.transitions_generated = self.transitions_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_dead_end(&mut self) {
        self.dead_ends = self.dead_ends.saturating_add(1);
    }

    #[inline]
    pub fn on_duplicate_skipped(&mut self) {
        self.duplicates_skipped = self.duplicates_skipped.saturating_add(1);
    }

    #[inline]
    pub fn on_frontier_size(&mut self, size: usize) {
        self.peak_frontier_size = self.peak_frontier_size.max(size as u64);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SafetyStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Banker Safety Statistics:")?;
        writeln!(f, "  Steps:                   {}", self.steps)?;
        writeln!(f, "  Configurations expanded: {}", self.configurations_expanded)?;
        writeln!(f, "  Transitions generated:   {}", self.transitions_generated)?;
        writeln!(f, "  Dead ends:               {}", self.dead_ends)?;
        writeln!(f, "  Duplicates skipped:      {}", self.duplicates_skipped)?;
        writeln!(f, "  Peak frontier size:      {}", self.peak_frontier_size)?;
        writeln!(f, "  Max depth reached:       {}", self.max_depth)?;
        writeln!(f, "  Total time:              {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let mut stats = SafetyStatistics::default();
        stats.on_step();
        stats.on_step();
        stats.on_configuration_expanded();
        stats.on_transition_generated();
        stats.on_dead_end();
        stats.on_duplicate_skipped();

        assert_eq!(stats.steps, 2);
        assert_eq!(stats.configurations_expanded, 1);
        assert_eq!(stats.transitions_generated, 1);
        assert_eq!(stats.dead_ends, 1);
        assert_eq!(stats.duplicates_skipped, 1);
    }

    #[test]
    fn test_maxima_only_grow() {
        let mut stats = SafetyStatistics::default();
        stats.on_frontier_size(4);
        stats.on_frontier_size(2);
        stats.on_depth_update(3);
        stats.on_depth_update(1);

        assert_eq!(stats.peak_frontier_size, 4);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let mut stats = SafetyStatistics {
            steps: u64::MAX,
            ..Default::default()
        };
        stats.on_step();
        assert_eq!(stats.steps, u64::MAX);
    }

    #[test]
    fn test_display_contains_counters() {
        let stats = SafetyStatistics {
            configurations_expanded: 7,
            ..Default::default()
        };
        let rendered = stats.to_string();
        assert!(rendered.starts_with("Banker Safety Statistics:"));
        assert!(rendered.contains("Configurations expanded: 7"));
    }
}
