//! End-to-end pipeline with boundary logging.
//!
//! raw template -> render -> wrapped as one addon's payload -> compose ->
//! ordered deployment descriptor.
//!
//! ## Logging Ownership
//!
//! This layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! `template` and `compose` use only `tracing::debug!()` for internal details.

use std::time::Instant;

use crate::compose::{compose, AddonUnit, DeploymentDescriptor, GlobalSettings, OrderingHint};
use crate::errors::{Result, StackError};
use crate::plan::Plan;
use crate::template::{render, Document, ParameterMap, PlaceholderSyntax, ToggleDirective};
use crate::{log_op_end, log_op_error, log_op_start};

/// Everything one pipeline run needs, fully resolved
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub document: Document,
    pub directives: Vec<ToggleDirective>,
    pub params: ParameterMap,
    pub syntax: PlaceholderSyntax,
    /// Addon the rendered document becomes the payload of
    pub addon: String,
    pub ordering: Option<OrderingHint>,
    /// Index among `units` to insert the rendered addon at (clamped; default 0)
    pub position: Option<usize>,
    pub settings: GlobalSettings,
    pub units: Vec<AddonUnit>,
}

impl PipelineRequest {
    /// Assemble a request from a validated plan
    ///
    /// # Errors
    /// * `InvalidPlan` - the plan has no template section
    pub fn from_plan(plan: &Plan, document: Document, settings: GlobalSettings) -> Result<Self> {
        let template = plan.template.as_ref().ok_or_else(|| StackError::InvalidPlan {
            reason: "plan has no template section".to_string(),
        })?;

        Ok(Self {
            document,
            directives: template.directives.clone(),
            params: template.params.clone(),
            syntax: template.syntax,
            addon: template.addon.clone(),
            ordering: template.ordering.clone(),
            position: template.position,
            settings,
            units: plan.units.clone(),
        })
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Render a template
///
/// # Errors
/// * `RecursiveParameter` - a value contains a placeholder for a bound key
/// * `MalformedTemplate` - a directive's start token is unmatched
pub fn render_template(
    document: &Document,
    directives: &[ToggleDirective],
    params: &ParameterMap,
    syntax: PlaceholderSyntax,
) -> Result<Document> {
    log_op_start!("render", directive_count = directives.len());
    let start = Instant::now();

    let rendered = render(document, directives, params, syntax).map_err(|e| {
        log_op_error!("render", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "render",
        duration_ms = elapsed_ms(start),
        input_len = document.len(),
        output_len = rendered.len()
    );

    Ok(rendered)
}

/// Compose addon units into a descriptor
///
/// # Errors
/// * `DuplicateAddon`, `UnknownAddon`, `OrderingConflict` - see [`compose`]
pub fn compose_units(
    settings: GlobalSettings,
    units: Vec<AddonUnit>,
) -> Result<DeploymentDescriptor> {
    log_op_start!("compose", addon_count = units.len());
    let start = Instant::now();

    let descriptor = compose(settings, units).map_err(|e| {
        log_op_error!("compose", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "compose",
        duration_ms = elapsed_ms(start),
        addon_count = descriptor.addons().len()
    );

    Ok(descriptor)
}

/// Run the whole pipeline
///
/// Atomic: returns the descriptor or the first error, never a partial result.
///
/// # Errors
/// * `RecursiveParameter`, `MalformedTemplate` - from rendering
/// * `DuplicateAddon`, `UnknownAddon`, `OrderingConflict` - from composing
/// * `Serialization` - the descriptor could not be digested
pub fn build_descriptor(request: PipelineRequest) -> Result<DeploymentDescriptor> {
    log_op_start!("build_descriptor", addon = %request.addon);
    let start = Instant::now();

    let outcome = build_descriptor_impl(request)
        .and_then(|descriptor| descriptor.digest().map(|digest| (descriptor, digest)));
    let (descriptor, digest) = outcome.map_err(|e| {
        log_op_error!(
            "build_descriptor",
            e.clone(),
            duration_ms = elapsed_ms(start)
        );
        e
    })?;

    log_op_end!(
        "build_descriptor",
        duration_ms = elapsed_ms(start),
        addon_count = descriptor.addons().len(),
        digest = %digest
    );

    Ok(descriptor)
}

fn build_descriptor_impl(request: PipelineRequest) -> Result<DeploymentDescriptor> {
    let rendered = render_template(
        &request.document,
        &request.directives,
        &request.params,
        request.syntax,
    )?;

    let mut unit = AddonUnit::rendered(request.addon, rendered);
    unit.ordering = request.ordering;

    let mut units = request.units;
    let position = request.position.unwrap_or(0).min(units.len());
    units.insert(position, unit);

    compose_units(request.settings, units)
}
