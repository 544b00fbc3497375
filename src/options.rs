use bon::bon;

/// Options controlling how a shell program is parsed and what the resulting
/// tree looks like.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserOptions {
    /// Whether or not comment nodes are retained in the tree.
    pub comments: bool,
    /// Whether or not `pos`/`endpos` byte offsets are attached to nodes.
    pub loc: bool,
    /// Whether or not `line`/`col`/`end_line`/`end_col` are attached to nodes.
    pub loc2: bool,
    /// Whether or not each node carries its own verbatim source slice.
    pub source: bool,
    /// Whether or not grammar rule entry/exit is logged via `tracing`.
    pub trace: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            comments: false,
            loc: false,
            loc2: false,
            source: false,
            trace: false,
        }
    }
}

#[bon]
impl ParserOptions {
    /// Creates a new set of parser options through a builder.
    #[builder(
        finish_fn(doc {
            /// Instantiate the options.
        })
    )]
    pub fn builder(
        #[builder(default = false)]
        /// Whether or not comment nodes are retained in the tree.
        comments: bool,
        #[builder(default = false)]
        /// Whether or not `pos`/`endpos` byte offsets are attached to nodes.
        loc: bool,
        #[builder(default = false)]
        /// Whether or not `line`/`col`/`end_line`/`end_col` are attached to nodes.
        loc2: bool,
        #[builder(default = false)]
        /// Whether or not each node carries its own verbatim source slice.
        source: bool,
        #[builder(default = false)]
        /// Whether or not grammar rule entry/exit is logged via `tracing`.
        trace: bool,
    ) -> Self {
        Self {
            comments,
            loc,
            loc2,
            source,
            trace,
        }
    }
}
