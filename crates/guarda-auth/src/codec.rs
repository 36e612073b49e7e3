//! Flat ⇄ structured permission transform.
//!
//! ```text
//!            flatten
//! {leads: {view: "own", edit: true, delete: false}}  ──►  ["leads.edit", "leads.view"]
//!                                                    ◄──
//! {leads: {view: true, edit: true}}                 unflatten
//! ```
//!
//! The editor works on the flat list, storage on the structured form.
//! The transform is **lossy**: the flat list only says "present", so
//! `OwnedOnly` comes back as `Allowed` and `TeamOnly` does not come back
//! at all. [`lost_on_round_trip`] reports exactly which pairs change.
//!
//! `flatten(unflatten(flatten(g))) == flatten(g)` holds for every grant.

use crate::capability::{join_capability, split_capability};
use crate::{GrantLevel, PermissionGrant, StructuredGrant};
use std::collections::BTreeSet;

/// Flattens a structured grant into capability strings.
///
/// Emits `resource.action` for every `Allowed` or `OwnedOnly` pair.
/// `Denied` and `TeamOnly` are never emitted, and neither is a pair whose
/// joined string would not split back into a pair (an empty name, or a
/// resource starting with `.`).
///
/// # Example
///
/// ```
/// use guarda_auth::{codec, GrantLevel, StructuredGrant};
///
/// let grant = StructuredGrant::new()
///     .with("leads", "view", GrantLevel::OwnedOnly)
///     .with("leads", "edit", GrantLevel::Allowed)
///     .with("leads", "delete", GrantLevel::Denied)
///     .with("tasks", "view", GrantLevel::TeamOnly);
///
/// let flat: Vec<_> = codec::flatten(&grant).into_iter().collect();
/// assert_eq!(flat, vec!["leads.edit", "leads.view"]);
/// ```
#[must_use]
pub fn flatten(grant: &StructuredGrant) -> BTreeSet<String> {
    grant
        .iter()
        .filter(|(_, _, level)| level.is_flattenable())
        .filter_map(|(resource, action, _)| {
            let cap = join_capability(resource, action);
            if split_capability(&cap).is_none() {
                tracing::debug!(
                    resource = %resource,
                    action = %action,
                    "skipping pair without a recoverable name"
                );
                return None;
            }
            Some(cap)
        })
        .collect()
}

/// Rebuilds a structured grant from capability strings.
///
/// Every string sets its pair to [`GrantLevel::Allowed`]. Unknown names
/// pass through as new keys. Strings that do not name a pair (no `.` or
/// an empty side) are skipped.
///
/// # Example
///
/// ```
/// use guarda_auth::{codec, GrantLevel};
///
/// let grant = codec::unflatten(["leads.view", "custom.thing", "garbage"]);
///
/// assert_eq!(grant.level("leads", "view"), GrantLevel::Allowed);
/// assert_eq!(grant.level("custom", "thing"), GrantLevel::Allowed);
/// assert_eq!(grant.resources().count(), 2);
/// ```
#[must_use]
pub fn unflatten<I, S>(capabilities: I) -> StructuredGrant
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut grant = StructuredGrant::new();
    for cap in capabilities {
        let cap = cap.as_ref();
        match split_capability(cap) {
            Some((resource, action)) => grant.set(resource, action, GrantLevel::Allowed),
            None => tracing::debug!(capability = %cap, "skipping entry without resource.action"),
        }
    }
    grant
}

/// Flattens either grant shape for the editor.
///
/// Legacy grants already are flat and come back unchanged, including
/// the `"all"` sentinel.
#[must_use]
pub fn flatten_grant(grant: &PermissionGrant) -> BTreeSet<String> {
    match grant {
        PermissionGrant::Legacy(caps) => caps.clone(),
        PermissionGrant::Structured(structured) => flatten(structured),
    }
}

/// A pair whose level a flatten → unflatten cycle changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LostLevel {
    /// Resource name.
    pub resource: String,
    /// Action name.
    pub action: String,
    /// Level before the cycle.
    pub before: GrantLevel,
    /// Level after the cycle (`None` if the pair disappears).
    pub after: Option<GrantLevel>,
}

/// Reports every pair whose level does not survive a round trip.
///
/// `OwnedOnly` becomes `Allowed`; `TeamOnly` disappears. Explicit
/// `Denied` entries also disappear but read the same afterwards, so
/// they are not reported.
///
/// ```
/// use guarda_auth::{codec, GrantLevel, StructuredGrant};
///
/// let grant = StructuredGrant::new()
///     .with("leads", "view", GrantLevel::OwnedOnly)
///     .with("leads", "edit", GrantLevel::Allowed);
///
/// let lost = codec::lost_on_round_trip(&grant);
/// assert_eq!(lost.len(), 1);
/// assert_eq!(lost[0].before, GrantLevel::OwnedOnly);
/// assert_eq!(lost[0].after, Some(GrantLevel::Allowed));
/// ```
#[must_use]
pub fn lost_on_round_trip(grant: &StructuredGrant) -> Vec<LostLevel> {
    let restored = unflatten(flatten(grant));
    grant
        .iter()
        .filter_map(|(resource, action, before)| {
            let after = restored.lookup(resource, action);
            (after.unwrap_or_default() != before).then(|| LostLevel {
                resource: resource.to_string(),
                action: action.to_string(),
                before,
                after,
            })
        })
        .collect()
}
