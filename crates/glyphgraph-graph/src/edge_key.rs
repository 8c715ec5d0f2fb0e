//! Edge identity: a directed multigraph distinguishes parallel edges by an
//! optional `name`, mirroring `graphlib`'s `(v, w, name)` edge key.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
    pub name: Option<String>,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>, name: Option<impl Into<String>>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
            name: name.map(Into::into),
        }
    }

    pub(crate) fn view(v: &str, w: &str, name: Option<&str>) -> Self {
        Self {
            v: v.to_string(),
            w: w.to_string(),
            name: name.map(str::to_string),
        }
    }
}
