/// Glyphs used by the CLI
pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const PERSON: &str = "👤";
    pub const KEY: &str = "🔑";
    pub const PIN: &str = "📍";
    pub const TROPHY: &str = "🏆";
    pub const GLOBE: &str = "🌍";
}
