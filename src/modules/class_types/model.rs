use sqlx::FromRow;

/// A reusable definition of a style of yoga class (e.g. "Vinyasa").
#[derive(Debug, Clone, FromRow)]
pub struct ClassType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub difficulty_level: Option<String>,
    pub base_price: f64,
}
