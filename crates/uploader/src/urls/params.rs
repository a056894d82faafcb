use std::fmt;

/// Output format the proxy should encode the derived variant in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Webp,
    Avif,
}

impl OutputFormat {
    /// Extension as it appears at the end of the request path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
            Self::Avif => "avif",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the proxy fits the source image into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    Fill,
    Fit,
    Auto,
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fill => "fill",
            Self::Fit => "fit",
            Self::Auto => "auto",
        })
    }
}

/// Which part of the image survives cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    North,
    South,
    East,
    West,
    Center,
    Smart,
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "no",
            Self::South => "so",
            Self::East => "ea",
            Self::West => "we",
            Self::Center => "ce",
            Self::Smart => "sm",
        })
    }
}

/// Scaling directive: mode, target box, and whether upscaling is allowed.
#[derive(Debug, Clone, Copy)]
pub struct Resize {
    pub mode: ResizeMode,
    pub width: u32,
    pub height: u32,
    pub enlarge: bool,
}

/// Rendering parameters for one derived variant.
///
/// Directives render into the request path in a fixed order (resize, then
/// gravity, then dpr), each only when set. The order and the `name:arg:…`
/// syntax are what the proxy parses; changing either changes the signed
/// bytes, so both are pinned by tests.
#[derive(Debug, Clone)]
pub struct TransformParams {
    pub resize: Option<Resize>,
    pub gravity: Option<Gravity>,
    pub dpr: Option<f64>,
    pub format: OutputFormat,
}

impl Default for TransformParams {
    /// The rendering every upload currently gets: a 0.3333 device-pixel
    /// ratio scale, encoded as png.
    fn default() -> Self {
        Self {
            resize: None,
            gravity: None,
            dpr: Some(0.3333),
            format: OutputFormat::Png,
        }
    }
}

impl TransformParams {
    /// Directive segments in their pinned order, ready to be joined with
    /// `/` into the request path.
    pub(crate) fn directives(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(resize) = &self.resize {
            out.push(format!(
                "rs:{}:{}:{}:{}",
                resize.mode, resize.width, resize.height, resize.enlarge as u8
            ));
        }
        if let Some(gravity) = &self.gravity {
            out.push(format!("g:{gravity}"));
        }
        if let Some(dpr) = self.dpr {
            out.push(format!("dpr:{dpr}"));
        }
        out
    }
}
