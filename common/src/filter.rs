use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::message::{Message, RecipientKind};
use crate::session::Role;

/// One selectable entry in a filter checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The filter options available to the session, one list per dimension.
/// Which lists are populated depends on the role's roster lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterCatalog {
    pub users: Vec<FilterOption>,
    pub classes: Vec<FilterOption>,
    pub students: Vec<FilterOption>,
}

impl RosterCatalog {
    pub fn options(&self, kind: RecipientKind) -> &[FilterOption] {
        match kind {
            RecipientKind::Users => &self.users,
            RecipientKind::Classes => &self.classes,
            RecipientKind::Students => &self.students,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.classes.is_empty() && self.students.is_empty()
    }
}

/// Selection state for a single recipient dimension.
///
/// `select_all` is never stored independently: it is re-derived at
/// construction and after every mutation, and holds exactly when every
/// available option is selected. With no options at all it is vacuously
/// true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDimension {
    options: Vec<FilterOption>,
    selected: BTreeSet<String>,
    select_all: bool,
}

impl FilterDimension {
    pub fn new(options: Vec<FilterOption>) -> Self {
        let mut dimension = Self {
            options,
            selected: BTreeSet::new(),
            select_all: false,
        };
        dimension.sync_select_all();
        dimension
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn select_all(&self) -> bool {
        self.select_all
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// True when this dimension constrains the visible list at all.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Add or remove one id, then re-derive the select-all flag.
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        self.sync_select_all();
    }

    /// Select every available option, or clear the selection entirely.
    pub fn set_all(&mut self, on: bool) {
        self.selected = if on {
            self.options.iter().map(|option| option.id.clone()).collect()
        } else {
            BTreeSet::new()
        };
        self.sync_select_all();
    }

    /// Flip between everything-selected and nothing-selected.
    pub fn toggle_all(&mut self) {
        let on = !self.select_all;
        self.set_all(on);
    }

    fn sync_select_all(&mut self) {
        self.select_all = self.selected.len() == self.options.len();
    }
}

impl Default for FilterDimension {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// The three recipient dimensions behind one keyed interface, so
/// selection and select-all behave identically regardless of dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    dimensions: [FilterDimension; 3],
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: &RosterCatalog) -> Self {
        let mut set = Self::new();
        for kind in RecipientKind::ALL {
            set.dimensions[Self::index(kind)] = FilterDimension::new(catalog.options(kind).to_vec());
        }
        set
    }

    fn index(kind: RecipientKind) -> usize {
        match kind {
            RecipientKind::Users => 0,
            RecipientKind::Classes => 1,
            RecipientKind::Students => 2,
        }
    }

    pub fn dimension(&self, kind: RecipientKind) -> &FilterDimension {
        &self.dimensions[Self::index(kind)]
    }

    pub fn dimension_mut(&mut self, kind: RecipientKind) -> &mut FilterDimension {
        &mut self.dimensions[Self::index(kind)]
    }

    pub fn toggle(&mut self, kind: RecipientKind, id: &str) {
        self.dimension_mut(kind).toggle(id);
    }

    pub fn toggle_all(&mut self, kind: RecipientKind) {
        self.dimension_mut(kind).toggle_all();
    }

    /// True when any dimension has at least one id selected.
    pub fn any_selection(&self) -> bool {
        self.dimensions.iter().any(FilterDimension::has_selection)
    }
}

/// Which messages the list shows under the current selections.
///
/// Admins always get the full list. For everyone else a message stays
/// visible when every dimension that has a selection matches at least
/// one of the message's recipient ids in that dimension: OR within a
/// dimension, AND across dimensions. A dimension with nothing selected
/// imposes no constraint.
pub fn visible_messages<'a>(
    messages: &'a [Message],
    filters: &FilterSet,
    role: Role,
) -> Vec<&'a Message> {
    if role == Role::Admin {
        return messages.iter().collect();
    }
    messages
        .iter()
        .filter(|message| {
            RecipientKind::ALL.into_iter().all(|kind| {
                let dimension = filters.dimension(kind);
                !dimension.has_selection()
                    || message
                        .recipients
                        .ids(kind)
                        .iter()
                        .any(|id| dimension.is_selected(id))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Recipients, Sender};

    fn option(id: &str) -> FilterOption {
        FilterOption::new(id, format!("Label {id}"))
    }

    fn catalog() -> RosterCatalog {
        RosterCatalog {
            users: vec![option("u-1"), option("u-2")],
            classes: vec![option("c-a"), option("c-b")],
            students: vec![option("s-1"), option("s-2"), option("s-3")],
        }
    }

    fn msg(id: &str, users: &[&str], classes: &[&str], students: &[&str]) -> Message {
        Message {
            id: id.into(),
            sender: Sender {
                name: "Ms Webb".into(),
                role: Role::Teacher,
            },
            recipients: Recipients {
                users: users.iter().map(|s| s.to_string()).collect(),
                classes: classes.iter().map(|s| s.to_string()).collect(),
                students: students.iter().map(|s| s.to_string()).collect(),
            },
            subject: format!("Subject {id}"),
            body: "body".into(),
            attachment: None,
            created_at: "2026-03-02T09:00:00Z".parse().unwrap(),
        }
    }

    fn ids(visible: &[&Message]) -> Vec<String> {
        visible.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn fresh_set_starts_unselected_with_flags_down() {
        let filters = FilterSet::from_catalog(&catalog());
        for kind in RecipientKind::ALL {
            let dimension = filters.dimension(kind);
            assert_eq!(dimension.selected_count(), 0);
            assert!(!dimension.select_all());
            assert!(!dimension.has_selection());
        }
        assert!(!filters.any_selection());
    }

    #[test]
    fn empty_selections_impose_no_constraint() {
        let filters = FilterSet::from_catalog(&catalog());
        let messages = vec![msg("m-1", &[], &["c-a"], &[]), msg("m-2", &["u-9"], &[], &[])];
        let visible = visible_messages(&messages, &filters, Role::Teacher);
        assert_eq!(ids(&visible), vec!["m-1", "m-2"]);
    }

    #[test]
    fn selection_keeps_only_matching_messages() {
        let mut filters = FilterSet::from_catalog(&catalog());
        filters.toggle(RecipientKind::Classes, "c-a");
        let messages = vec![
            msg("m-1", &[], &["c-a"], &[]),
            msg("m-2", &[], &["c-b"], &[]),
            msg("m-3", &[], &[], &["s-1"]),
        ];
        let visible = visible_messages(&messages, &filters, Role::Teacher);
        assert_eq!(ids(&visible), vec!["m-1"]);
    }

    #[test]
    fn or_within_a_dimension() {
        let mut filters = FilterSet::from_catalog(&catalog());
        filters.toggle(RecipientKind::Classes, "c-a");
        filters.toggle(RecipientKind::Classes, "c-b");
        let messages = vec![
            msg("m-1", &[], &["c-a"], &[]),
            msg("m-2", &[], &["c-b"], &[]),
            msg("m-3", &[], &["c-z"], &[]),
        ];
        let visible = visible_messages(&messages, &filters, Role::Teacher);
        assert_eq!(ids(&visible), vec!["m-1", "m-2"]);
    }

    #[test]
    fn and_across_dimensions() {
        let mut filters = FilterSet::from_catalog(&catalog());
        filters.toggle(RecipientKind::Classes, "c-a");
        filters.toggle(RecipientKind::Students, "s-1");
        let messages = vec![
            msg("m-both", &[], &["c-a"], &["s-1"]),
            msg("m-class-only", &[], &["c-a"], &[]),
            msg("m-student-only", &[], &[], &["s-1"]),
        ];
        let visible = visible_messages(&messages, &filters, Role::Teacher);
        assert_eq!(ids(&visible), vec!["m-both"]);
    }

    #[test]
    fn admins_bypass_every_selection() {
        let mut filters = FilterSet::from_catalog(&catalog());
        filters.toggle(RecipientKind::Classes, "c-a");
        filters.toggle(RecipientKind::Users, "u-1");
        let messages = vec![msg("m-1", &[], &[], &[]), msg("m-2", &[], &["c-z"], &[])];
        let visible = visible_messages(&messages, &filters, Role::Admin);
        assert_eq!(visible.len(), messages.len());
    }

    #[test]
    fn visible_is_always_a_subset_of_the_fetched_list() {
        let mut filters = FilterSet::from_catalog(&catalog());
        filters.toggle(RecipientKind::Users, "u-1");
        filters.toggle(RecipientKind::Students, "s-2");
        let messages = vec![
            msg("m-1", &["u-1"], &[], &["s-2"]),
            msg("m-2", &["u-1"], &[], &[]),
            msg("m-3", &[], &["c-a"], &["s-2"]),
        ];
        let all_ids: Vec<String> = messages.iter().map(|m| m.id.clone()).collect();
        let visible = visible_messages(&messages, &filters, Role::Parent);
        for id in ids(&visible) {
            assert!(all_ids.contains(&id));
        }
    }

    #[test]
    fn toggle_twice_restores_the_previous_selection() {
        let mut filters = FilterSet::from_catalog(&catalog());
        filters.toggle(RecipientKind::Students, "s-1");
        let before = filters.clone();
        filters.toggle(RecipientKind::Students, "s-2");
        filters.toggle(RecipientKind::Students, "s-2");
        assert_eq!(filters, before);
    }

    #[test]
    fn select_all_selects_everything_and_again_clears() {
        let mut filters = FilterSet::from_catalog(&catalog());
        filters.toggle_all(RecipientKind::Students);
        let dimension = filters.dimension(RecipientKind::Students);
        assert_eq!(dimension.selected_count(), 3);
        assert!(dimension.select_all());

        filters.toggle_all(RecipientKind::Students);
        let dimension = filters.dimension(RecipientKind::Students);
        assert_eq!(dimension.selected_count(), 0);
        assert!(!dimension.select_all());
    }

    #[test]
    fn select_all_flag_tracks_size_equality_through_toggles() {
        let mut dimension = FilterDimension::new(vec![option("a"), option("b")]);
        dimension.toggle("a");
        assert!(!dimension.select_all());
        dimension.toggle("b");
        assert!(dimension.select_all());
        dimension.toggle("a");
        assert!(!dimension.select_all());
    }

    #[test]
    fn select_all_is_vacuously_true_without_options() {
        let dimension = FilterDimension::new(Vec::new());
        assert!(dimension.select_all());
        assert!(!dimension.has_selection());

        let mut dimension = dimension;
        dimension.toggle_all();
        assert!(!dimension.has_selection());
    }

    #[test]
    fn every_construction_path_keeps_the_flag_synced() {
        assert_eq!(FilterDimension::default(), FilterDimension::new(Vec::new()));

        for filters in [FilterSet::new(), FilterSet::default()] {
            for kind in RecipientKind::ALL {
                let dimension = filters.dimension(kind);
                assert_eq!(
                    dimension.select_all(),
                    dimension.selected_count() == dimension.options().len()
                );
                assert!(dimension.select_all());
            }
        }
    }

    #[test]
    fn selecting_all_dimensions_matches_fully_addressed_messages() {
        let mut filters = FilterSet::from_catalog(&catalog());
        for kind in RecipientKind::ALL {
            filters.toggle_all(kind);
        }
        let messages = vec![
            msg("m-wide", &["u-1"], &["c-b"], &["s-3"]),
            msg("m-untagged", &[], &[], &[]),
        ];
        let visible = visible_messages(&messages, &filters, Role::Teacher);
        assert_eq!(ids(&visible), vec!["m-wide"]);
    }
}
