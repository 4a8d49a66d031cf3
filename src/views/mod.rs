//! Read-mostly pages: lists, detail, family tree

pub mod family_tree;
pub mod horse_detail;
pub mod horse_list;
pub mod owner_list;

pub use family_tree::{render_lines, FamilyTree, TreeLine, TreeRole};
pub use horse_detail::{HorseDetailView, NO_OWNER};
pub use horse_list::{HorseFilterForm, HorseList};
pub use owner_list::OwnerList;
