use phf::{Set, phf_set};

static NAMED_COLORS: Set<&'static str> = phf_set! {
    "white", "black", "gray", "grey", "red", "green", "blue", "yellow", "orange",
    "cyan", "magenta", "pink", "purple", "violet", "brown", "olive", "teal",
    "lightteal", "deepteal", "palecyan", "aquamarine", "lightblue", "skyblue",
    "slate", "lightmagenta", "hotpink", "salmon", "raspberry", "firebrick",
    "ruby", "chocolate", "wheat", "sand", "limon", "lime", "limegreen",
    "palegreen", "forest", "splitpea", "smudge", "marine", "density", "deepblue",
    "purpleblue", "lightorange", "brightorange", "yelloworange", "paleyellow",
    "lightpink", "dirtyviolet", "warmpink", "deepsalmon", "tv_red", "tv_green",
    "tv_blue", "tv_yellow", "tv_orange", "grey50", "gray50", "grey70", "gray70",
    "grey90", "gray90",
};

static REPRESENTATIONS: Set<&'static str> = phf_set! {
    "lines", "sticks", "spheres", "nb_spheres", "cartoon", "ribbon", "surface",
    "mesh", "dots", "labels", "cell", "everything",
};

/// Whether `color` is accepted by the rendering engine as a color argument.
///
/// Accepts the engine's built-in color names (case-insensitive) and hex
/// literals in the form `0xRRGGBB`.
pub fn is_known_color(color: &str) -> bool {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix("0x") {
        return hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    NAMED_COLORS.contains(color.to_ascii_lowercase().as_str())
}

/// Whether `name` is a molecular representation the rendering engine can show.
pub fn is_known_representation(name: &str) -> bool {
    REPRESENTATIONS.contains(name.trim())
}
