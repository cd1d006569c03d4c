//! Markdown rendering of the base image page.
//!
//! Walks architectures (configured order), then the devices of each
//! architecture by display name, then distros, then language flavors, and
//! writes one table row per compatible combination.

use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};

use crate::core::listing::{image_suffix, Distro, Flavor, Listing};
use crate::resolver::{Compatibility, FALLBACK_OS};
use crate::util::config::Config;

const TABLE_HEADER: &str = "| Image | Links | Available Tag |";
const TABLE_ALIGN: &str = "|:-----------|:------------|:------------|";

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub image: String,
    pub docker_hub: String,
    pub github: String,
    pub tags: String,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| {} | [Docker Hub]({}), [GitHub]({}) | {} |",
            self.image, self.docker_hub, self.github, self.tags
        )
    }
}

/// Counts reported after a page has been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub sections: usize,
    pub devices: usize,
    pub rows: usize,
    pub skipped: usize,
}

pub struct PageRenderer<'a> {
    config: &'a Config,
    compat: &'a Compatibility,
    flavors: Vec<Flavor>,
}

impl<'a> PageRenderer<'a> {
    pub fn new(config: &'a Config, compat: &'a Compatibility, flavors: Vec<Flavor>) -> Self {
        PageRenderer {
            config,
            compat,
            flavors,
        }
    }

    /// Write the whole page.
    pub fn render(&self, listings: &[Listing], out: &mut dyn Write) -> Result<PageSummary> {
        let mut summary = PageSummary::default();

        writeln!(
            out,
            "---\ntitle: {}\nexcerpt: {}\n---\n<!-- Auto Generated by contracts -->",
            self.config.page.title, self.config.page.excerpt
        )?;

        for header in &self.config.headers {
            writeln!(out, "\n\n### {}:", header.label)?;
            summary.sections += 1;

            let mut devices: Vec<&Listing> =
                listings.iter().filter(|l| l.arch == header.arch).collect();
            devices.sort_by(|a, b| a.name.cmp(&b.name));

            for device in devices {
                self.render_device(device, listings, out, &mut summary)?;
            }
        }

        Ok(summary)
    }

    fn render_device(
        &self,
        device: &Listing,
        listings: &[Listing],
        out: &mut dyn Write,
        summary: &mut PageSummary,
    ) -> Result<()> {
        writeln!(out, "\n\n##### {}\n\n", device.name)?;
        writeln!(out, "{}", TABLE_HEADER)?;
        writeln!(out, "{}", TABLE_ALIGN)?;
        summary.devices += 1;

        // every listing sharing the slug contributes its distros
        for same in listings.iter().filter(|l| l.id == device.id) {
            for distro in &same.distros {
                for flavor in &self.flavors {
                    match self.row(device, distro, flavor)? {
                        Some(row) => {
                            writeln!(out, "{}", row)?;
                            summary.rows += 1;
                        }
                        None => summary.skipped += 1,
                    }
                }
            }
        }

        Ok(())
    }

    /// The row for one combination, or `None` when the language cannot be
    /// used on this architecture or OS.
    pub fn row(&self, device: &Listing, distro: &Distro, flavor: &Flavor) -> Result<Option<Row>> {
        let suffix = image_suffix(&device.id, distro, flavor);
        if self.compat.is_incompatible(flavor, &device.arch, distro) {
            tracing::debug!("skipping {}: language unavailable", suffix);
            return Ok(None);
        }

        let urls = &self.config.urls;
        let image = format!("{}{}", urls.image_base, suffix);
        let docker_hub = format!("{}{}", urls.docker_base, suffix);

        let (github, tags) = match flavor.language() {
            None => (
                format!("{}{}", urls.device_base, device.id),
                self.tag_column(&device.arch, distro)?,
            ),
            Some(lang) => (
                format!(
                    "{}{}/{}/{}",
                    urls.lang_base,
                    lang,
                    device.id,
                    distro.os().unwrap_or("")
                ),
                format!(
                    "For available image tags, refer [here]({}/tags)",
                    docker_hub
                ),
            ),
        };

        Ok(Some(Row {
            image,
            docker_hub,
            github,
            tags,
        }))
    }

    /// Comma separated tags for a base image.
    fn tag_column(&self, arch: &str, distro: &Distro) -> Result<String> {
        let (os, tags) = self.compat.tags_for(distro).ok_or_else(|| {
            anyhow!(
                "no tags for `{}` and no `{}` tags to fall back to",
                distro.os().unwrap_or("unspecified OS"),
                FALLBACK_OS
            )
        })?;

        let mut tags = tags.to_vec();
        if let Some(dropped) = self.config.tag_override(arch, os) {
            match tags.iter().position(|t| t == dropped) {
                Some(i) => {
                    tags.remove(i);
                }
                None => tracing::warn!(
                    "tag override `{}` for {} on {} does not match any tag",
                    dropped,
                    os,
                    arch
                ),
            }
        }

        Ok(tags.join(", "))
    }
}
