//! Deterministic proposal copy.
//!
//! Pure functions: the same evidence and current value always produce the
//! same proposal. The generation pass depends on that for idempotency, and
//! the tests depend on it for exactness. Length limits follow search-snippet
//! guidance and are counted in characters, never bytes, so multibyte text
//! cannot land on a broken boundary.

use mend_core::entities::{CrawledPage, SiteAudit};

use crate::mapping::ProposalKind;

pub const TITLE_MIN: usize = 30;
pub const TITLE_MAX: usize = 60;
const TITLE_KEEP: usize = 57;
pub const DESC_MIN: usize = 120;
pub const DESC_MAX: usize = 160;
const DESC_TRIM_TARGET: usize = 155;
/// A word-boundary trim must keep at least this many chars to be worth
/// more than synthesized copy.
const DESC_MIN_KEPT: usize = 80;
/// Below this, a source description is too thin to seed an OG description.
const OG_DESC_MIN_SOURCE: usize = 60;

/// Site-level evidence the generator works from: the audit row plus the
/// homepage crawl capture.
#[derive(Debug, Clone, Default)]
pub struct SiteEvidence {
    /// Host of the audited site, e.g. `acme.dev`. Empty when the site URL
    /// could not be parsed.
    pub domain: String,
    pub site_title: Option<String>,
    pub page_title: Option<String>,
    pub page_description: Option<String>,
    pub page_noindex: bool,
}

impl SiteEvidence {
    #[must_use]
    pub fn gather(audit: &SiteAudit, homepage: Option<&CrawledPage>) -> Self {
        Self {
            domain: domain_of(&audit.site_url),
            site_title: audit.site_title.clone(),
            page_title: homepage.and_then(|p| p.title.clone()),
            page_description: homepage.and_then(|p| p.meta_description.clone()),
            page_noindex: homepage.is_some_and(|p| p.noindex),
        }
    }

    /// Brand name for synthesized copy: the site title when present, else a
    /// name derived from the domain.
    #[must_use]
    pub fn brand(&self) -> String {
        non_empty(self.site_title.as_deref())
            .map_or_else(|| derived_name(&self.domain), ToString::to_string)
    }
}

/// Propose a replacement value for one field kind.
///
/// `current` is the remote CMS value snapshot; on-page evidence is the
/// fallback source. Returns `None` when no safe proposal exists:
/// credential-like fields are never guessed, and the robots flag is only
/// proposed when the crawl actually saw the page blocking indexing.
#[must_use]
pub fn propose(
    kind: ProposalKind,
    evidence: &SiteEvidence,
    current: Option<&str>,
) -> Option<String> {
    match kind {
        ProposalKind::PageTitle | ProposalKind::OgTitle => Some(title_proposal(evidence, current)),
        ProposalKind::MetaDescription => Some(description_proposal(evidence, current)),
        ProposalKind::OgDescription => Some(og_description_proposal(evidence, current)),
        ProposalKind::CanonicalUrl => canonical_proposal(evidence),
        ProposalKind::TwitterCard => Some("summary_large_image".to_string()),
        ProposalKind::RobotsIndex => evidence.page_noindex.then(|| "true".to_string()),
        ProposalKind::OrgName => org_name_proposal(evidence, current),
        ProposalKind::AnalyticsId | ProposalKind::SocialHandle => None,
    }
}

fn title_proposal(evidence: &SiteEvidence, current: Option<&str>) -> String {
    let source = non_empty(current).or_else(|| non_empty(evidence.page_title.as_deref()));
    source.map_or_else(
        || format!("{} | Official Website", evidence.brand()),
        |text| sized_title(text, evidence),
    )
}

fn sized_title(source: &str, evidence: &SiteEvidence) -> String {
    let len = source.chars().count();
    if len > TITLE_MAX {
        return truncate_with_ellipsis(source, TITLE_KEEP);
    }
    if len >= TITLE_MIN {
        return source.to_string();
    }
    let suffixed = format!("{source} | {}", evidence.brand());
    if suffixed.chars().count() > TITLE_MAX {
        truncate_with_ellipsis(&suffixed, TITLE_KEEP)
    } else {
        suffixed
    }
}

fn description_proposal(evidence: &SiteEvidence, current: Option<&str>) -> String {
    let source = non_empty(current).or_else(|| non_empty(evidence.page_description.as_deref()));
    source.map_or_else(
        || synthesized_description(evidence),
        |text| sized_description(text, evidence),
    )
}

fn sized_description(source: &str, evidence: &SiteEvidence) -> String {
    let len = source.chars().count();
    if (DESC_MIN..=DESC_MAX).contains(&len) {
        return source.to_string();
    }
    if len > DESC_MAX {
        if let Some(trimmed) = word_boundary_cut(source, DESC_TRIM_TARGET) {
            return trimmed;
        }
    }
    synthesized_description(evidence)
}

/// Cut at the last space within `limit` chars and append an ellipsis.
///
/// Returns `None` when the cut would keep fewer than [`DESC_MIN_KEPT`]
/// chars, meaning the text has no usable early word boundary.
fn word_boundary_cut(text: &str, limit: usize) -> Option<String> {
    let end = text.char_indices().nth(limit).map_or(text.len(), |(i, _)| i);
    let head = &text[..end];
    let cut = head.rfind(' ')?;
    let kept = head[..cut].trim_end();
    if kept.chars().count() < DESC_MIN_KEPT {
        return None;
    }
    Some(format!("{kept}..."))
}

/// Generic benefit statement for sites with no usable description.
fn synthesized_description(evidence: &SiteEvidence) -> String {
    let brand = evidence.brand();
    let domain = &evidence.domain;
    format!(
        "{brand} offers practical tools and resources to help you move faster. \
         Learn more about what {brand} can do for you at {domain}."
    )
}

fn og_description_proposal(evidence: &SiteEvidence, current: Option<&str>) -> String {
    let source = non_empty(current).or_else(|| non_empty(evidence.page_description.as_deref()));
    match source {
        Some(text) if text.chars().count() >= OG_DESC_MIN_SOURCE => {
            sized_description(text, evidence)
        }
        _ => format!("Learn more about {} at {}.", evidence.brand(), evidence.domain),
    }
}

fn canonical_proposal(evidence: &SiteEvidence) -> Option<String> {
    // Always the absolute root form. Never inferred from path heuristics.
    if evidence.domain.is_empty() {
        return None;
    }
    Some(format!("https://{}/", evidence.domain))
}

fn org_name_proposal(evidence: &SiteEvidence, current: Option<&str>) -> Option<String> {
    // A human-entered name always beats a domain-derived guess.
    if non_empty(current).is_some() {
        return None;
    }
    let name = derived_name(&evidence.domain);
    (!name.is_empty()).then_some(name)
}

/// `Some` only for text with non-whitespace content, trimmed.
fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Take the first `keep` chars and append an ellipsis.
fn truncate_with_ellipsis(text: &str, keep: usize) -> String {
    let kept: String = text.chars().take(keep).collect();
    format!("{}...", kept.trim_end())
}

/// Host portion of a site URL: scheme, path, query and port stripped,
/// lowercased. `www.` is kept; the audited host is authoritative.
#[must_use]
pub fn domain_of(site_url: &str) -> String {
    let stripped = site_url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host = stripped.split(['/', '?', '#']).next().unwrap_or("");
    let host = host.split(':').next().unwrap_or("");
    host.to_lowercase()
}

/// Organization-name guess from a domain: the second-to-last dot segment,
/// first letter capitalized (`store.acme.dev` → `Acme`).
#[must_use]
pub fn derived_name(domain: &str) -> String {
    let segments: Vec<&str> = domain.split('.').filter(|s| !s.is_empty()).collect();
    let name = match segments.len() {
        0 => "",
        1 => segments[0],
        n => segments[n - 2],
    };
    capitalize(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
