// Crossword generation: the layout engine and what sits directly on it

pub mod export;
pub mod grid;
pub mod layout;
pub mod word_list;

pub use export::{render_svg, SvgOptions, SVG_FILENAME};
pub use grid::Grid;
pub use layout::{generate_layout, Layout, LayoutError};
pub use word_list::{parse_word_list, WordListError, WordListRules};
