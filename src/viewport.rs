//! Intersection-driven state: reveal-once targets and active-section
//! tracking for the nav.
//!
//! Both trackers consume [`IntersectionEntry`] batches as delivered by the
//! host's observer. When the host has no observer, reveal targets are
//! revealed up front ([`RevealTracker::reveal_all`]) and sections can be fed
//! from measured rectangles instead ([`ActiveSectionTracker::on_measured`]).

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::config::{NavConfig, PageConfig, RevealConfig};
use crate::dom::PageTree;
use crate::effect::Effect;
use crate::geometry::{Margin, Rect, measure};

/// One observer report for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`.
    pub ratio: f64,
}

impl<N> IntersectionEntry<N> {
    #[must_use]
    pub fn new(target: N, is_intersecting: bool, ratio: f64) -> Self {
        Self { target, is_intersecting, ratio }
    }

    /// Entry for `target` measured at `rect` against `viewport` shrunk by `margin`.
    #[must_use]
    pub fn measured(target: N, rect: Rect, viewport: Rect, margin: &Margin) -> Self {
        let (is_intersecting, ratio) = measure(rect, viewport, margin);
        Self { target, is_intersecting, ratio }
    }
}

// =============================================================================
// REVEAL-ONCE
// =============================================================================

/// Targets that transition to "revealed" the first time they are visible enough.
#[derive(Debug, Clone)]
pub struct RevealTracker<N> {
    pending: Vec<N>,
    revealed: Vec<N>,
    threshold: f64,
    revealed_class: String,
}

impl<N: Clone + PartialEq> RevealTracker<N> {
    #[must_use]
    pub fn new(targets: Vec<N>, config: &RevealConfig) -> Self {
        Self {
            pending: targets,
            revealed: Vec::new(),
            threshold: config.threshold,
            revealed_class: config.revealed_class.clone(),
        }
    }

    /// Collect every reveal target from `tree`.
    pub fn attach<T: PageTree<Node = N>>(tree: &T, config: &RevealConfig) -> Self {
        Self::new(tree.elements_by_class(None, &config.target_class), config)
    }

    /// Targets still waiting to be revealed; these are what the host observes.
    #[must_use]
    pub fn pending(&self) -> &[N] {
        &self.pending
    }

    #[must_use]
    pub fn is_revealed(&self, target: &N) -> bool {
        self.revealed.contains(target)
    }

    /// Reveal every pending target whose entry crosses the threshold.
    /// Entries for already revealed or unknown targets are ignored.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry<N>]) -> Vec<Effect<N>> {
        let mut effects = Vec::new();
        for entry in entries {
            if !entry.is_intersecting || entry.ratio < self.threshold {
                continue;
            }
            effects.extend(self.reveal(&entry.target));
        }
        effects
    }

    /// Reveal everything at once (no observer available).
    pub fn reveal_all(&mut self) -> Vec<Effect<N>> {
        let targets = self.pending.clone();
        targets.iter().flat_map(|t| self.reveal(t)).collect()
    }

    fn reveal(&mut self, target: &N) -> Vec<Effect<N>> {
        let Some(idx) = self.pending.iter().position(|p| p == target) else {
            return Vec::new();
        };
        let node = self.pending.remove(idx);
        self.revealed.push(node.clone());
        vec![Effect::class(node.clone(), &self.revealed_class, true), Effect::Unobserve { node }]
    }
}

// =============================================================================
// ACTIVE SECTION
// =============================================================================

#[derive(Debug, Clone)]
struct Section<N> {
    node: N,
    id: String,
}

#[derive(Debug, Clone)]
struct NavLink<N> {
    node: N,
    href: Option<String>,
}

/// Highlights the nav link of the topmost section inside the active band.
///
/// The tracker keeps the set of sections currently intersecting. The active
/// section is the first of them in document order; when the set is empty
/// the last active section stays highlighted.
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker<N> {
    sections: Vec<Section<N>>,
    intersecting: Vec<bool>,
    links: Vec<NavLink<N>>,
    active: Option<usize>,
    threshold: f64,
    margin: Margin,
    active_classes: Vec<String>,
    inactive_classes: Vec<String>,
}

impl<N: Clone + PartialEq> ActiveSectionTracker<N> {
    /// Sections are `(node, id)` pairs in document order; links are
    /// `(node, href)` pairs.
    #[must_use]
    pub fn new(sections: Vec<(N, String)>, links: Vec<(N, Option<String>)>, config: &NavConfig, margin: Margin) -> Self {
        let sections: Vec<Section<N>> = sections.into_iter().map(|(node, id)| Section { node, id }).collect();
        Self {
            intersecting: vec![false; sections.len()],
            sections,
            links: links.into_iter().map(|(node, href)| NavLink { node, href }).collect(),
            active: None,
            threshold: config.threshold,
            margin,
            active_classes: config.active_classes.clone(),
            inactive_classes: config.inactive_classes.clone(),
        }
    }

    /// Collect `<section id>` targets and nav links from `tree`.
    ///
    /// Returns `None` when the page has no sections or no links, in which
    /// case there is nothing to track.
    pub fn attach<T: PageTree<Node = N>>(tree: &T, config: &PageConfig, margin: Margin) -> Option<Self> {
        let sections: Vec<(N, String)> = tree
            .elements_by_tag(None, &config.nav.section_tag)
            .into_iter()
            .filter_map(|node| {
                let id = tree.attribute(&node, "id")?;
                (!id.is_empty()).then_some((node, id))
            })
            .collect();
        let links: Vec<(N, Option<String>)> = tree
            .elements_by_class(None, &config.nav.link_class)
            .into_iter()
            .map(|node| {
                let href = tree.attribute(&node, "href");
                (node, href)
            })
            .collect();
        if sections.is_empty() || links.is_empty() {
            return None;
        }
        Some(Self::new(sections, links, &config.nav, margin))
    }

    /// Section targets the host should observe.
    #[must_use]
    pub fn targets(&self) -> Vec<N> {
        self.sections.iter().map(|s| s.node.clone()).collect()
    }

    /// Id of the highlighted section.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.and_then(|i| self.sections.get(i)).map(|s| s.id.as_str())
    }

    /// Fold an observer batch into the intersecting set and re-highlight if
    /// the active section changed.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry<N>]) -> Vec<Effect<N>> {
        for entry in entries {
            let Some(idx) = self.sections.iter().position(|s| s.node == entry.target) else {
                continue;
            };
            self.intersecting[idx] = entry.is_intersecting && entry.ratio >= self.threshold;
        }

        let Some(topmost) = self.intersecting.iter().position(|hit| *hit) else {
            return Vec::new();
        };
        if self.active == Some(topmost) {
            return Vec::new();
        }
        self.active = Some(topmost);
        log::debug!("active section -> {}", self.sections[topmost].id);
        self.highlight(&self.sections[topmost].id)
    }

    /// Fallback path: measure every section against the viewport.
    pub fn on_measured(&mut self, viewport: Rect, rects: &[(N, Rect)]) -> Vec<Effect<N>> {
        let entries: Vec<IntersectionEntry<N>> = rects
            .iter()
            .map(|(node, rect)| IntersectionEntry::measured(node.clone(), *rect, viewport, &self.margin))
            .collect();
        self.on_intersections(&entries)
    }

    fn highlight(&self, id: &str) -> Vec<Effect<N>> {
        let anchor = format!("#{id}");
        let mut effects = Vec::new();
        for link in &self.links {
            let active = link.href.as_deref() == Some(anchor.as_str());
            for class in &self.active_classes {
                effects.push(Effect::class(link.node.clone(), class, active));
            }
            for class in &self.inactive_classes {
                effects.push(Effect::class(link.node.clone(), class, !active));
            }
        }
        effects
    }
}
