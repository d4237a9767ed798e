//! Static icon-name → glyph table. Clients reference icons by symbolic name;
//! unknown names resolve to a defined fallback instead of failing at render
//! time.

pub const FALLBACK_ICON: &str = "\u{25A6}"; // ▦

const ICON_TABLE: &[(&str, &str)] = &[
    ("MessageSquare", "\u{1F4AC}"),
    ("UserCheck", "\u{1F464}"),
    ("Briefcase", "\u{1F4BC}"),
    ("LayoutDashboard", "\u{1F4CA}"),
    ("Database", "\u{1F5C3}"),
    ("DraftingCompass", "\u{1F4D0}"),
    ("Truck", "\u{1F69A}"),
    ("Workflow", "\u{1F500}"),
    ("TestTube", "\u{1F9EA}"),
    ("ClipboardList", "\u{1F4CB}"),
    ("Shield", "\u{1F6E1}"),
    ("Globe", "\u{1F310}"),
    ("Terminal", "\u{2328}"),
    ("AppWindow", "\u{25A6}"),
];

pub fn resolve(name: &str) -> &'static str {
    ICON_TABLE
        .iter()
        .find(|(icon_name, _)| *icon_name == name)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(FALLBACK_ICON)
}

pub fn is_known(name: &str) -> bool {
    ICON_TABLE.iter().any(|(icon_name, _)| *icon_name == name)
}
