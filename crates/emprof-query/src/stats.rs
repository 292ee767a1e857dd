use emprof_core::{Profile, ProfileStatus};

/// The dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub completed: usize,
    pub processing: usize,
    pub failed: usize,
}

#[must_use]
pub fn collection_stats(profiles: &[Profile]) -> CollectionStats {
    let mut stats = CollectionStats {
        total: profiles.len(),
        ..CollectionStats::default()
    };
    for profile in profiles {
        match profile.status {
            ProfileStatus::Completed => stats.completed += 1,
            ProfileStatus::Processing => stats.processing += 1,
            ProfileStatus::Failed => stats.failed += 1,
        }
    }
    stats
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
