//! Listings and the image variants rendered for each device.

/// The operating system part of an image name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distro {
    /// No OS in the image name; the device's default base.
    Unspecified,
    Os(String),
}

impl Distro {
    pub fn os(&self) -> Option<&str> {
        match self {
            Distro::Unspecified => None,
            Distro::Os(os) => Some(os),
        }
    }
}

/// The language part of an image name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flavor {
    /// The plain device/OS base image.
    Base,
    Language(String),
}

impl Flavor {
    pub fn language(&self) -> Option<&str> {
        match self {
            Flavor::Base => None,
            Flavor::Language(lang) => Some(lang),
        }
    }
}

/// One device as it appears on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Device slug, used in image names and links
    pub id: String,
    /// Display name, used for the section heading and ordering
    pub name: String,
    pub arch: String,
    /// Distros available for the device's architecture
    pub distros: Vec<Distro>,
}

/// Image name suffix: `<device>[-<os>][-<language>]`.
pub fn image_suffix(device: &str, distro: &Distro, flavor: &Flavor) -> String {
    let mut suffix = device.to_string();
    if let Some(os) = distro.os() {
        suffix.push('-');
        suffix.push_str(os);
    }
    if let Some(lang) = flavor.language() {
        suffix.push('-');
        suffix.push_str(lang);
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_suffix() {
        let os = Distro::Os("alpine".into());
        let lang = Flavor::Language("node".into());

        assert_eq!(image_suffix("nuc", &Distro::Unspecified, &Flavor::Base), "nuc");
        assert_eq!(image_suffix("nuc", &os, &Flavor::Base), "nuc-alpine");
        assert_eq!(image_suffix("nuc", &Distro::Unspecified, &lang), "nuc-node");
        assert_eq!(image_suffix("nuc", &os, &lang), "nuc-alpine-node");
    }
}
