use serde::Serialize;

/// Id of the synthetic registry entry that stands for "every campus".
pub const ALL_CAMPUSES_ID: &str = "all";

/// A university community a post can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Campus {
    pub id: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
}

impl Campus {
    const fn new(id: &'static str, name: &'static str, short_name: &'static str) -> Self {
        Self {
            id,
            name,
            short_name,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.id == ALL_CAMPUSES_ID
    }
}

static CAMPUSES: [Campus; 9] = [
    Campus::new(ALL_CAMPUSES_ID, "All Campuses", "All"),
    Campus::new("unilag", "University of Lagos", "UNILAG"),
    Campus::new("oau", "Obafemi Awolowo University", "OAU"),
    Campus::new("ui", "University of Ibadan", "UI"),
    Campus::new("uniben", "University of Benin", "UNIBEN"),
    Campus::new("abu", "Ahmadu Bello University", "ABU"),
    Campus::new("unn", "University of Nigeria, Nsukka", "UNN"),
    Campus::new("covenant", "Covenant University", "Covenant"),
    Campus::new("lasu", "Lagos State University", "LASU"),
];

/// Every registry entry, wildcard first.
pub fn all() -> &'static [Campus] {
    &CAMPUSES
}

/// Real campuses a post can be written for (the wildcard left out).
pub fn selectable() -> impl Iterator<Item = &'static Campus> {
    CAMPUSES.iter().filter(|c| !c.is_wildcard())
}

pub fn find_by_id(id: &str) -> Option<&'static Campus> {
    CAMPUSES.iter().find(|c| c.id == id)
}
