//! # Course Context
//!
//! Static description of the course a student is working through. The
//! hosting environment would normally supply this; here a built-in catalog
//! stands in for it.

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseContext {
    pub course_id: String,
    pub course_name: String,
    pub units: Vec<Unit>,
    pub current_unit: Unit,
    pub key_topics: Vec<Topic>,
}

impl CourseContext {
    /// Returns a copy of this context focused on another unit.
    /// Unknown unit ids leave the current unit unchanged.
    pub fn with_unit(&self, unit_id: &str) -> CourseContext {
        let mut ctx = self.clone();
        if let Some(unit) = self.units.iter().find(|u| u.id == unit_id) {
            ctx.current_unit = unit.clone();
        } else {
            debug!(
                "Unknown unit '{}' for course {}, keeping '{}'",
                unit_id, self.course_id, self.current_unit.id
            );
        }
        ctx
    }
}

/// The set of courses the service knows about. The first entry is the
/// fallback for unknown course ids.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<CourseContext>,
}

impl CourseCatalog {
    pub fn new(courses: Vec<CourseContext>) -> Self {
        Self { courses }
    }

    /// Catalog holding the built-in biology course.
    pub fn builtin() -> Self {
        Self::new(vec![intro_biology()])
    }

    /// Resolves a course and unit. Missing or unknown ids fall back to the
    /// first course and its first unit.
    pub fn context(&self, course_id: Option<&str>, unit_id: Option<&str>) -> CourseContext {
        let course = course_id
            .and_then(|id| self.courses.iter().find(|c| c.course_id == id))
            .or_else(|| {
                if let Some(id) = course_id {
                    debug!("Unknown course '{}', using default course", id);
                }
                self.courses.first()
            })
            .cloned()
            .unwrap_or_else(intro_biology);

        match unit_id {
            Some(id) => course.with_unit(id),
            None => course,
        }
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn intro_biology() -> CourseContext {
    let units = vec![
        Unit {
            id: "unit1".to_string(),
            name: "Cell Structure".to_string(),
        },
        Unit {
            id: "unit2".to_string(),
            name: "Photosynthesis".to_string(),
        },
    ];
    let topic = |name: &str, description: &str| Topic {
        name: name.to_string(),
        description: description.to_string(),
    };

    CourseContext {
        course_id: "BIO101".to_string(),
        course_name: "Introduction to Biology".to_string(),
        current_unit: units[0].clone(),
        units,
        key_topics: vec![
            topic(
                "Cell Membrane",
                "The protective barrier around cells that regulates what enters and exits.",
            ),
            topic(
                "Nucleus",
                "The control center of the cell containing genetic material.",
            ),
            topic(
                "Mitochondria",
                "The powerhouse of the cell, producing energy through cellular respiration.",
            ),
            topic(
                "Photosynthesis",
                "The process plants use to turn light, water and carbon dioxide into glucose and oxygen.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_course_defaults_to_first_unit() {
        let ctx = CourseCatalog::builtin().context(None, None);
        assert_eq!(ctx.course_id, "BIO101");
        assert_eq!(ctx.course_name, "Introduction to Biology");
        assert_eq!(ctx.current_unit.name, "Cell Structure");
        assert!(!ctx.key_topics.is_empty());
    }

    #[test]
    fn test_context_selects_requested_unit() {
        let ctx = CourseCatalog::builtin().context(Some("BIO101"), Some("unit2"));
        assert_eq!(ctx.current_unit.id, "unit2");
        assert_eq!(ctx.current_unit.name, "Photosynthesis");
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        let ctx = CourseCatalog::builtin().context(Some("CHEM200"), Some("unit9"));
        assert_eq!(ctx.course_id, "BIO101");
        assert_eq!(ctx.current_unit.id, "unit1");
    }

    #[test]
    fn test_empty_catalog_still_resolves() {
        let ctx = CourseCatalog::new(Vec::new()).context(Some("BIO101"), None);
        assert_eq!(ctx.course_id, "BIO101");
    }

    #[test]
    fn test_course_context_serializes_camel_case() {
        let ctx = CourseCatalog::builtin().context(None, None);
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains(r#""courseName":"Introduction to Biology""#));
        assert!(json.contains(r#""currentUnit""#));
        assert!(json.contains(r#""keyTopics""#));
    }
}
