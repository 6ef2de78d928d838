//! Plan file parser with validation
//!
//! A plan is a YAML document describing one run: toggle directives and
//! parameters for the template, the addon units to compose with it, and the
//! (possibly incomplete) global settings. Parsing is pure; reading the file
//! and resolving settings from the environment is the caller's job.

use std::collections::HashSet;

use serde::Deserialize;

use crate::compose::{AddonPayload, AddonUnit, GlobalSettings, OrderingHint, ResourceProvider};
use crate::errors::{Result, StackError};
use crate::template::{check_params, MarkerPair, ParameterMap, PlaceholderSyntax, ToggleDirective};

/// Only supported plan schema version
pub const PLAN_SCHEMA_VERSION: u32 = 0;

// ===== Raw file format =====

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    #[serde(default)]
    schema_version: u32,
    #[serde(default)]
    settings: SettingsSpec,
    #[serde(default)]
    template: Option<TemplateFile>,
    #[serde(default)]
    addons: Vec<AddonFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateFile {
    addon: String,
    #[serde(default)]
    position: Option<usize>,
    #[serde(default)]
    before: Option<String>,
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    syntax: PlaceholderSyntax,
    #[serde(default)]
    directives: Vec<DirectiveFile>,
    #[serde(default)]
    params: ParameterMap,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DirectiveFile {
    marker: String,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    keep: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddonFile {
    name: String,
    #[serde(default)]
    values: serde_json::Value,
    #[serde(default)]
    before: Option<String>,
    #[serde(default)]
    after: Option<String>,
}

// ===== Validated plan =====

/// Global settings as written in the plan; account and region may be absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsSpec {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub resource_providers: Vec<ResourceProvider>,
}

/// One source of account/region values (command line, environment, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSource {
    pub account: Option<String>,
    pub region: Option<String>,
}

impl SettingsSpec {
    /// Resolve to fully populated settings
    ///
    /// Precedence: `overrides`, then the plan's own values, then `fallback`.
    ///
    /// # Errors
    /// * `InvalidPlan` - account, region or version is still missing
    pub fn resolve(
        &self,
        overrides: &SettingsSource,
        fallback: &SettingsSource,
    ) -> Result<GlobalSettings> {
        let pick = |over: &Option<String>, own: &Option<String>, fall: &Option<String>, what: &str| {
            over.clone()
                .or_else(|| own.clone())
                .or_else(|| fall.clone())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| invalid(format!("{} is not set", what)))
        };

        let account = pick(&overrides.account, &self.account, &fallback.account, "account")?;
        let region = pick(&overrides.region, &self.region, &fallback.region, "region")?;
        let version = pick(&None, &self.version, &None, "version")?;

        Ok(GlobalSettings {
            account,
            region,
            version,
            resource_providers: self.resource_providers.clone(),
        })
    }
}

/// Template section of a validated plan
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePlan {
    /// Addon the rendered document becomes the payload of
    pub addon: String,
    /// Insertion index among the other units (clamped; default first)
    pub position: Option<usize>,
    pub ordering: Option<OrderingHint>,
    pub syntax: PlaceholderSyntax,
    pub directives: Vec<ToggleDirective>,
    pub params: ParameterMap,
}

/// A parsed and validated plan
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub settings: SettingsSpec,
    pub template: Option<TemplatePlan>,
    pub units: Vec<AddonUnit>,
}

impl Plan {
    /// Directives of the template section, empty when there is none
    pub fn directives(&self) -> &[ToggleDirective] {
        self.template
            .as_ref()
            .map(|t| t.directives.as_slice())
            .unwrap_or(&[])
    }
}

fn invalid(reason: impl Into<String>) -> StackError {
    StackError::InvalidPlan {
        reason: reason.into(),
    }
}

fn ordering(owner: &str, before: Option<String>, after: Option<String>) -> Result<Option<OrderingHint>> {
    match (before, after) {
        (Some(_), Some(_)) => Err(invalid(format!(
            "addon {} has both 'before' and 'after'; only one ordering hint is allowed",
            owner
        ))),
        (Some(b), None) => Ok(Some(OrderingHint::Before(b))),
        (None, Some(a)) => Ok(Some(OrderingHint::After(a))),
        (None, None) => Ok(None),
    }
}

fn directive(raw: DirectiveFile) -> Result<ToggleDirective> {
    let marker = match (raw.start, raw.end) {
        (None, None) => MarkerPair::named(raw.marker),
        (Some(start), Some(end)) => MarkerPair::new(raw.marker, start, end),
        _ => {
            return Err(invalid(format!(
                "directive {} must give both 'start' and 'end' or neither",
                raw.marker
            )))
        }
    };
    if marker.start.is_empty() || marker.end.is_empty() {
        return Err(invalid(format!("directive {} has an empty token", marker.name)));
    }
    Ok(ToggleDirective {
        marker,
        keep_interior: raw.keep,
    })
}

fn template_plan(raw: TemplateFile) -> Result<TemplatePlan> {
    if raw.addon.trim().is_empty() {
        return Err(invalid("template addon name cannot be empty"));
    }

    let mut seen = HashSet::new();
    let mut directives = Vec::with_capacity(raw.directives.len());
    for d in raw.directives {
        if !seen.insert(d.marker.clone()) {
            return Err(invalid(format!("duplicate directive for marker {}", d.marker)));
        }
        directives.push(directive(d)?);
    }

    check_params(&raw.params, raw.syntax).map_err(|e| invalid(e.to_string()))?;

    Ok(TemplatePlan {
        ordering: ordering(&raw.addon, raw.before, raw.after)?,
        addon: raw.addon,
        position: raw.position,
        syntax: raw.syntax,
        directives,
        params: raw.params,
    })
}

/// Parse and validate a plan from YAML text
///
/// # Errors
/// * `InvalidPlan` - YAML syntax error, unknown field, unsupported
///   `schema_version`, duplicate directive marker, half-specified or empty
///   tokens, or a unit with both `before` and `after`
pub fn parse_plan_str(content: &str) -> Result<Plan> {
    let raw: PlanFile = serde_yaml::from_str(content)
        .map_err(|e| invalid(format!("YAML parse error: {}", e)))?;

    if raw.schema_version != PLAN_SCHEMA_VERSION {
        return Err(invalid(format!(
            "Unsupported schema_version: {}. Expected {}",
            raw.schema_version, PLAN_SCHEMA_VERSION
        )));
    }

    let template = raw.template.map(template_plan).transpose()?;

    let mut units = Vec::with_capacity(raw.addons.len());
    for addon in raw.addons {
        if addon.name.trim().is_empty() {
            return Err(invalid("addon name cannot be empty"));
        }
        let hint = ordering(&addon.name, addon.before, addon.after)?;
        units.push(AddonUnit {
            name: addon.name,
            payload: AddonPayload::Values(addon.values),
            ordering: hint,
        });
    }

    tracing::debug!(
        directive_count = template.as_ref().map_or(0, |t| t.directives.len()),
        addon_count = units.len(),
        "parsed plan"
    );

    Ok(Plan {
        settings: raw.settings,
        template,
        units,
    })
}
