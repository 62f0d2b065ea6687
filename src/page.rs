//! Result page controller.
//!
//! [`LinkCheckPage`] plays the part of the single-page front end: it accepts a
//! pasted link, waits a short simulated processing time, computes a verdict,
//! rebuilds the result card and plays the confidence gauge on it.
//!
//! Only one check is pending at a time. Starting a new check cancels the
//! previous one, and [`LinkCheckPage::cancel_token`] cancels the pending check
//! together with every later one (used for Ctrl-C).

use std::time::Duration;

use log::{debug, info};
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::app::normalize_url;
use crate::config::{Config, PROCESSING_JITTER_MS, SETTLE_CLASS};
use crate::dom::Element;
use crate::error_handling::CheckError;
use crate::gauge::{drive, AnimationOptions, DriveOutcome, FrameDriverOptions, GaugeAnimator};
use crate::share::{copy_payload, share_links};
use crate::verdict::{analyze, Verdict};

/// Id of the result card root element.
pub const RESULT_CARD_ID: &str = "result-card";

/// Result of a finished check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub verdict: Verdict,
    /// Result card markup after the gauge settled.
    pub markup: String,
    /// Value the gauge finished on.
    pub gauge_value: f64,
}

/// Owns the result card and the gauge shown on it.
#[derive(Debug)]
pub struct LinkCheckPage {
    card: Element,
    status: Option<String>,
    gauge: Option<GaugeAnimator>,
    animation: AnimationOptions,
    frames: FrameDriverOptions,
    delay: Duration,
    jitter: Duration,
    shutdown: CancellationToken,
    pending: Option<CancellationToken>,
}

impl LinkCheckPage {
    /// Creates a page with the given gauge and latency settings.
    pub fn new(animation: AnimationOptions, frames: FrameDriverOptions, delay: Duration) -> Self {
        Self {
            card: empty_card(),
            status: None,
            gauge: None,
            animation,
            frames,
            delay,
            jitter: Duration::from_millis(PROCESSING_JITTER_MS),
            shutdown: CancellationToken::new(),
            pending: None,
        }
    }

    /// Creates a page configured from CLI options.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.animation_options(),
            config.frame_driver_options(),
            config.processing_delay(),
        )
    }

    /// Replaces the random latency jitter added to the base delay.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Token that cancels the pending check and all later ones.
    pub fn cancel_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// The current result card.
    pub fn card(&self) -> &Element {
        &self.card
    }

    /// Status line shown above the card, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The gauge on the current card, if a verdict is shown.
    pub fn gauge(&self) -> Option<&GaugeAnimator> {
        self.gauge.as_ref()
    }

    /// Checks one pasted link and plays its verdict.
    ///
    /// `on_frame` is called with the card and the gauge value after every
    /// rendered frame.
    ///
    /// # Returns
    ///
    /// `Ok(Some(outcome))` once the gauge settles, or `Ok(None)` when the check
    /// was cancelled while processing or animating.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] when the input is not an acceptable link. The
    /// card is cleared and a status message is set.
    pub async fn check<F>(&mut self, input: &str, on_frame: F) -> Result<Option<CheckOutcome>, CheckError>
    where
        F: FnMut(&Element, f64),
    {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }

        let url = match normalize_url(input) {
            Ok(url) => url,
            Err(e) => {
                self.clear_card();
                self.status = Some(format!("Please enter a valid link ({e})"));
                return Err(e);
            }
        };

        let token = self.shutdown.child_token();
        self.pending = Some(token.clone());
        self.clear_card();
        self.status = Some("Checking link...".to_string());

        let latency = self.delay + self.sample_jitter();
        debug!("Processing {} for {:?}", url, latency);
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Check of {} cancelled while processing", url);
                self.status = None;
                return Ok(None);
            }
            _ = tokio::time::sleep(latency) => {}
        }

        let verdict = analyze(&url);
        self.status = None;
        self.show_verdict(&verdict);

        let Some(gauge) = self.gauge.as_mut() else {
            return Ok(None);
        };
        let handle = gauge.animate_to(
            &mut self.card,
            f64::from(verdict.confidence),
            verdict.color(),
            self.animation.clone(),
        );

        // Forward page cancellation to the running animation.
        let forward = handle.map(|handle| {
            let token = token.clone();
            tokio::spawn(async move {
                token.cancelled().await;
                handle.cancel();
            })
        });
        let outcome = drive(gauge, &mut self.card, &self.frames, on_frame).await;
        if let Some(task) = forward {
            task.abort();
        }

        match outcome {
            DriveOutcome::Completed(value) => {
                info!(
                    "{} -> {} ({}% confidence)",
                    verdict.url, verdict.kind, verdict.confidence
                );
                Ok(Some(CheckOutcome {
                    markup: self.card.to_markup(),
                    verdict,
                    gauge_value: value,
                }))
            }
            DriveOutcome::Cancelled | DriveOutcome::Idle => {
                debug!("Gauge for {} did not settle", verdict.url);
                Ok(None)
            }
        }
    }

    fn sample_jitter(&self) -> Duration {
        let max = self.jitter.as_millis() as u64;
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=max))
    }

    fn clear_card(&mut self) {
        // Dropping the animator cancels its run.
        self.gauge = None;
        self.card = empty_card();
    }

    /// Rebuilds the card for `verdict` with a fresh gauge at 0.
    fn show_verdict(&mut self, verdict: &Verdict) {
        let mut holder = Element::new("div").with_attr("class", "gauge-container");
        let mut gauge = GaugeAnimator::create(&mut holder, 0.0);
        let label_id = gauge.ids().label.clone();
        gauge.on_complete(move |dom, completion| {
            if let Some(label) = dom.find_by_id_mut(&label_id) {
                label.add_class(SETTLE_CLASS);
            }
            debug!("Gauge {} settled at {}", completion.gauge_id, completion.value);
        });

        let mut reasons = Element::new("ul").with_attr("class", "verdict-reasons");
        if verdict.findings.is_empty() {
            reasons.append(Element::new("li").with_text("No warning signs found"));
        }
        for finding in &verdict.findings {
            let text = if finding.detail.is_empty() {
                finding.check.description().to_string()
            } else {
                format!("{} ({})", finding.check.description(), finding.detail)
            };
            reasons.append(Element::new("li").with_text(text));
        }

        let mut actions = Element::new("div").with_attr("class", "share-actions");
        for link in share_links(verdict) {
            actions.append(
                Element::new("a")
                    .with_attr("class", "share-link")
                    .with_attr("href", link.href)
                    .with_attr("target", "_blank")
                    .with_attr("rel", "noopener")
                    .with_text(link.target.label()),
            );
        }
        actions.append(
            Element::new("button")
                .with_attr("class", "copy-result")
                .with_attr("data-copy", copy_payload(verdict))
                .with_text("Copy result"),
        );

        let mut card = Element::new("section")
            .with_attr("id", RESULT_CARD_ID)
            .with_attr("class", "result-card")
            .with_attr("data-verdict", verdict.kind.as_str())
            .with_attr("style", format!("border-color: {}", verdict.color()))
            .with_child(
                Element::new("h2")
                    .with_attr("class", "verdict-title")
                    .with_text(verdict.kind.title()),
            )
            .with_child(
                Element::new("p")
                    .with_attr("class", "checked-url")
                    .with_text(verdict.url.clone()),
            )
            .with_child(holder)
            .with_child(reasons)
            .with_child(actions);
        card.add_class(&format!("verdict-{}", verdict.kind.as_str()));

        self.card = card;
        self.gauge = Some(gauge);
    }
}

fn empty_card() -> Element {
    Element::new("section")
        .with_attr("id", RESULT_CARD_ID)
        .with_attr("class", "result-card")
        .with_attr("hidden", "hidden")
}
