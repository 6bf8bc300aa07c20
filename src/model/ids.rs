use serde::{Deserialize, Serialize};

/// Declare a newtype string ID for one element kind.
///
/// IDs are assigned by whoever created the document (e.g. `sc1`, `pl2`);
/// this crate never mints or parses them, it only keys collections by them.
macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }
    };
}

id_type!(
    /// A chapter in the manuscript containment tree.
    ChapterId
);
id_type!(
    /// A section of manuscript content (a matrix row).
    SectionId
);
id_type!(
    /// A plot line (a matrix column).
    PlotLineId
);
id_type!(
    /// A character (a matrix column).
    CharacterId
);
id_type!(
    /// A location (a matrix column).
    LocationId
);
id_type!(
    /// An item (a matrix column).
    ItemId
);
id_type!(
    /// A plot point, owned by a plot line and optionally tied to a section.
    PlotPointId
);
