//! In-memory ordering and lookup helpers over survey and link collections.

use canvass_core::entities::{Survey, SurveyQuestionLink};

/// Surveys sorted by name, case-insensitively. Ties keep their input order.
#[must_use]
pub fn sort_by_name(surveys: &[Survey]) -> Vec<Survey> {
    let mut sorted = surveys.to_vec();
    sorted.sort_by_cached_key(|s| s.name.to_lowercase());
    sorted
}

/// Locate a survey by id with a binary search over a private id-sorted view.
/// The caller's slice is never reordered.
#[must_use]
pub fn find_by_id<'a>(surveys: &'a [Survey], id: &str) -> Option<&'a Survey> {
    let mut by_id: Vec<&Survey> = surveys.iter().collect();
    by_id.sort_by(|a, b| a.id.cmp(&b.id));
    by_id
        .binary_search_by(|s| s.id.as_str().cmp(id))
        .ok()
        .map(|idx| by_id[idx])
}

/// Find the link at `position` in an order-sorted link list.
#[must_use]
pub fn find_link_by_position(
    links: &[SurveyQuestionLink],
    position: u32,
) -> Option<&SurveyQuestionLink> {
    links.iter().find(|link| link.position == position)
}
