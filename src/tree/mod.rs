//! Genealogy tree storage.
//!
//! A binary network of members kept in petgraph's StableGraph. The layout,
//! view and explorer modules only read it; it is built once from records or
//! through the construction API and never rebalanced.

mod genealogy;
mod member;
mod record;
mod side;

pub use genealogy::GenealogyTree;
pub use member::{Member, MemberId};
pub use record::MemberRecord;
pub use side::Side;
