//! Expansion of a device selection into the ordered check matrix.
//!
//! The matrix is fully generated before any evaluation runs. Identical device
//! selection and identical file contents always yield the identical ordered
//! sequence of instances; reporting and re-run comparison depend on it.

use crate::checks::CheckDef;
use crate::policy::{EffectiveConfig, RuleScope};
use crate::source::TreeSource;
use anyhow::Context;
use regex::Regex;

/// Interface blocks are located by this header pattern.
const INTERFACE_HEADER: &str = r"^interface";

/// One scheduled check. Carries identifiers, not node handles: the evaluator
/// re-resolves the interface node from the cached tree, so a structurally
/// identical rebuild of the tree is always tolerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckInstance {
    pub device: String,
    /// Interface header text for interface-scoped checks.
    pub interface: Option<String>,
    pub check_id: String,
}

/// Expand enabled checks over the device selection.
///
/// Device-scoped checks emit one instance per device, in selection order.
/// Interface-scoped checks emit one instance per (device, interface header),
/// interfaces ordered as they appear in the file.
pub fn generate<S: TreeSource>(
    source: &mut S,
    devices: &[String],
    catalog: &[CheckDef],
    cfg: &EffectiveConfig,
) -> anyhow::Result<Vec<CheckInstance>> {
    let header = Regex::new(INTERFACE_HEADER).context("compile interface header pattern")?;

    let mut out = Vec::new();
    for def in catalog {
        if cfg.check_policy(def.id).is_none() {
            continue;
        }
        match def.scope {
            RuleScope::Device => {
                for device in devices {
                    out.push(CheckInstance {
                        device: device.clone(),
                        interface: None,
                        check_id: def.id.to_string(),
                    });
                }
            }
            RuleScope::Interface => {
                for device in devices {
                    let tree = source.tree(device)?;
                    for intf in tree.find_objects(&header) {
                        out.push(CheckInstance {
                            device: device.clone(),
                            interface: Some(intf.text().to_string()),
                            check_id: def.id.to_string(),
                        });
                    }
                }
            }
        }
    }
    Ok(out)
}
