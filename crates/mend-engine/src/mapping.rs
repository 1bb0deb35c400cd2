//! Static issue-type to field-target mapping.
//!
//! The table is versioned data, not computed: it names exactly which CMS
//! field each known analyzer issue type remediates. It is intentionally
//! partial. Unmapped issue types are skipped by the generation pass, never
//! rejected, so new analyzer versions can ship findings before this table
//! learns about them.
//!
//! Synonym issue types (analyzer renames across versions) share one target
//! list; `missing_open_graph` fans out to two targets.

/// What kind of value the proposal generator should produce for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalKind {
    PageTitle,
    MetaDescription,
    OgTitle,
    OgDescription,
    CanonicalUrl,
    TwitterCard,
    RobotsIndex,
    OrgName,
    AnalyticsId,
    SocialHandle,
}

/// One CMS field a finding remediates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTarget {
    /// Logical content type holding the field.
    pub document_type: &'static str,
    /// Nested path to the field inside the document.
    pub path_segments: &'static [&'static str],
    pub kind: ProposalKind,
}

/// Content type for per-page SEO fields.
pub const DOC_LANDING_PAGE: &str = "landingPage";
/// Content type for the site-wide settings singleton.
pub const DOC_SITE_SETTINGS: &str = "siteSettings";

const PAGE_TITLE: &[FieldTarget] = &[FieldTarget {
    document_type: DOC_LANDING_PAGE,
    path_segments: &["seo", "metaTitle"],
    kind: ProposalKind::PageTitle,
}];

const META_DESCRIPTION: &[FieldTarget] = &[FieldTarget {
    document_type: DOC_LANDING_PAGE,
    path_segments: &["seo", "metaDescription"],
    kind: ProposalKind::MetaDescription,
}];

const OPEN_GRAPH: &[FieldTarget] = &[
    FieldTarget {
        document_type: DOC_LANDING_PAGE,
        path_segments: &["seo", "ogTitle"],
        kind: ProposalKind::OgTitle,
    },
    FieldTarget {
        document_type: DOC_LANDING_PAGE,
        path_segments: &["seo", "ogDescription"],
        kind: ProposalKind::OgDescription,
    },
];

const CANONICAL_URL: &[FieldTarget] = &[FieldTarget {
    document_type: DOC_LANDING_PAGE,
    path_segments: &["seo", "canonicalUrl"],
    kind: ProposalKind::CanonicalUrl,
}];

const TWITTER_CARD: &[FieldTarget] = &[FieldTarget {
    document_type: DOC_LANDING_PAGE,
    path_segments: &["seo", "twitterCard"],
    kind: ProposalKind::TwitterCard,
}];

const ROBOTS_INDEX: &[FieldTarget] = &[FieldTarget {
    document_type: DOC_LANDING_PAGE,
    path_segments: &["seo", "robots", "index"],
    kind: ProposalKind::RobotsIndex,
}];

const ORG_NAME: &[FieldTarget] = &[FieldTarget {
    document_type: DOC_SITE_SETTINGS,
    path_segments: &["organizationName"],
    kind: ProposalKind::OrgName,
}];

const ANALYTICS_ID: &[FieldTarget] = &[FieldTarget {
    document_type: DOC_SITE_SETTINGS,
    path_segments: &["analytics", "measurementId"],
    kind: ProposalKind::AnalyticsId,
}];

const SOCIAL_HANDLE: &[FieldTarget] = &[FieldTarget {
    document_type: DOC_SITE_SETTINGS,
    path_segments: &["social", "twitterHandle"],
    kind: ProposalKind::SocialHandle,
}];

/// Field targets for an issue type. An empty slice means unmapped.
#[must_use]
pub fn lookup(issue_type: &str) -> &'static [FieldTarget] {
    match issue_type {
        "missing_title" | "title_too_short" | "title_too_long" => PAGE_TITLE,
        "missing_meta_description" | "meta_description_too_short" | "meta_description_too_long" => {
            META_DESCRIPTION
        }
        "missing_open_graph" | "missing_og_tags" => OPEN_GRAPH,
        "missing_canonical" | "missing_canonical_url" => CANONICAL_URL,
        "missing_twitter_card" => TWITTER_CARD,
        "noindex_detected" | "robots_noindex" => ROBOTS_INDEX,
        "missing_organization_name" | "missing_org_name" => ORG_NAME,
        "missing_analytics_id" => ANALYTICS_ID,
        "missing_social_profiles" => SOCIAL_HANDLE,
        _ => &[],
    }
}
