//! Which search results the user wants to download.

/// Checkbox state for each returned thumbnail, in result order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbSelection {
    thumbs: Vec<String>,
    checked: Vec<bool>,
}

impl ThumbSelection {
    /// Everything starts selected.
    pub fn all_of(thumbs: &[String]) -> Self {
        Self {
            thumbs: thumbs.to_vec(),
            checked: vec![true; thumbs.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.thumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbs.is_empty()
    }

    pub fn is_selected(&self, thumb: &str) -> bool {
        self.position(thumb).is_some_and(|i| self.checked[i])
    }

    /// Set one thumbnail. Returns `None` if it is not part of the results.
    pub fn set(&mut self, thumb: &str, selected: bool) -> Option<bool> {
        let i = self.position(thumb)?;
        self.checked[i] = selected;
        Some(selected)
    }

    /// Flip one thumbnail. Returns the new state, or `None` if unknown.
    pub fn toggle(&mut self, thumb: &str) -> Option<bool> {
        let i = self.position(thumb)?;
        self.checked[i] = !self.checked[i];
        Some(self.checked[i])
    }

    pub fn select_all(&mut self) {
        self.checked.fill(true);
    }

    pub fn select_none(&mut self) {
        self.checked.fill(false);
    }

    pub fn select_inverse(&mut self) {
        for checked in &mut self.checked {
            *checked = !*checked;
        }
    }

    /// Selected thumbnails in result order.
    pub fn selected(&self) -> Vec<String> {
        self.thumbs
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(thumb, _)| thumb.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.checked.iter().filter(|c| **c).count()
    }

    fn position(&self, thumb: &str) -> Option<usize> {
        self.thumbs.iter().position(|t| t == thumb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumbs() -> Vec<String> {
        ["3/thumb/a.jpg", "3/thumb/b.jpg", "3/thumb/c.jpg"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_starts_all_selected() {
        let selection = ThumbSelection::all_of(&thumbs());
        assert_eq!(selection.selected(), thumbs());
        assert_eq!(selection.selected_count(), 3);
    }

    #[test]
    fn test_toggle_and_inverse() {
        let mut selection = ThumbSelection::all_of(&thumbs());

        assert_eq!(selection.toggle("3/thumb/b.jpg"), Some(false));
        assert!(!selection.is_selected("3/thumb/b.jpg"));

        selection.select_inverse();
        assert_eq!(selection.selected(), vec!["3/thumb/b.jpg".to_string()]);
    }

    #[test]
    fn test_select_none_then_all() {
        let mut selection = ThumbSelection::all_of(&thumbs());

        selection.select_none();
        assert!(selection.selected().is_empty());

        selection.select_all();
        assert_eq!(selection.selected_count(), 3);
    }

    #[test]
    fn test_unknown_thumb() {
        let mut selection = ThumbSelection::all_of(&thumbs());

        assert_eq!(selection.toggle("9/thumb/z.jpg"), None);
        assert_eq!(selection.set("9/thumb/z.jpg", true), None);
        assert!(!selection.is_selected("9/thumb/z.jpg"));
    }

    #[test]
    fn test_empty_results() {
        let selection = ThumbSelection::all_of(&[]);
        assert!(selection.is_empty());
        assert!(selection.selected().is_empty());
    }
}
