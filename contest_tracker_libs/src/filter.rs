use crate::model::Platform;

/// Set of platforms whose contests are shown in the upcoming and past lists.
///
/// At least one platform is always selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformFilter {
    selected: Vec<Platform>,
}

impl Default for PlatformFilter {
    fn default() -> Self {
        Self {
            selected: Platform::ALL.to_vec(),
        }
    }
}

impl PlatformFilter {
    pub fn selected(&self) -> &[Platform] {
        &self.selected
    }

    pub fn is_selected(&self, platform: Platform) -> bool {
        self.selected.contains(&platform)
    }

    /// Deselects a selected platform, or selects an unselected one.
    ///
    /// Deselecting the last selected platform is ignored. Returns whether the selection changed.
    pub fn toggle(&mut self, platform: Platform) -> bool {
        if self.is_selected(platform) {
            if self.selected.len() > 1 {
                self.selected.retain(|p| *p != platform);
                true
            } else {
                tracing::debug!("{} is the only selected platform; keep it", platform);
                false
            }
        } else {
            self.selected.push(platform);
            true
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn all_platforms_are_selected_by_default() {
        let filter = PlatformFilter::default();
        assert_eq!(filter.selected(), &Platform::ALL);
    }

    #[test]
    fn toggle_removes_and_adds() {
        let mut filter = PlatformFilter::default();

        assert!(filter.toggle(Platform::CodeChef));
        assert!(!filter.is_selected(Platform::CodeChef));
        assert!(filter.toggle(Platform::CodeChef));
        assert!(filter.is_selected(Platform::CodeChef));
    }

    #[test]
    fn last_platform_cannot_be_deselected() {
        let mut filter = PlatformFilter::default();
        filter.toggle(Platform::Codeforces);
        filter.toggle(Platform::CodeChef);

        assert!(!filter.toggle(Platform::LeetCode));
        assert_eq!(filter.selected(), &[Platform::LeetCode]);
    }

    #[test]
    fn selection_is_never_empty() {
        let mut filter = PlatformFilter::default();
        let sequence = [
            Platform::Codeforces,
            Platform::LeetCode,
            Platform::CodeChef,
            Platform::CodeChef,
            Platform::Codeforces,
            Platform::CodeChef,
            Platform::LeetCode,
            Platform::Codeforces,
            Platform::Codeforces,
            Platform::CodeChef,
        ];

        for (i, platform) in sequence.iter().cycle().take(100).enumerate() {
            filter.toggle(*platform);
            assert!(
                !filter.selected().is_empty(),
                "selection became empty after {} toggles",
                i + 1
            );
        }
    }
}
