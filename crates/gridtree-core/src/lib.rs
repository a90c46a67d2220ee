//! # Lazily materialized tree index
//!
//! `gridtree-core` is the data model behind a virtualized tree/grid widget.
//! It answers three questions for trees far too large to instantiate:
//!
//! - which node sits at flat row `N`?
//! - what is node `X`'s pixel offset from the top?
//! - how many rows does a subtree currently occupy?
//!
//! ## Declared vs. materialized
//!
//! A parent declares how many children it has with [`Tree::set_item_count`].
//! Those slots count as rows immediately, but no node exists for them until
//! the data source creates one ([`Tree::create_child`]) or a query lands on
//! the slot and synthesizes a placeholder ([`Tree::child`]).
//!
//! ```rust
//! use gridtree_core::*;
//!
//! let mut tree = Tree::new(); // 16 px rows
//! let root = tree.root();
//! tree.set_item_count(root, 5).unwrap();
//! assert_eq!(tree.visible_children_count(root), 5);
//!
//! let second = tree.create_child(root, 1).unwrap();
//! tree.set_item_count(second, 3).unwrap();
//! tree.set_expanded(second, true).unwrap();
//!
//! assert_eq!(tree.visible_children_count(root), 8);
//! let third = tree.child(root, 2).unwrap(); // placeholder
//! assert_eq!(tree.offset(third), 80);
//! assert_eq!(tree.flat_index(third), Some(5));
//! ```
//!
//! ## Waypoints
//!
//! Every collapsed child is exactly one row tall. Each node keeps the set of
//! its expanded children, and offset / flat-index math only walks those,
//! so cost tracks the number of expanded siblings rather than the number of
//! siblings.
//!
//! ## Updates
//!
//! Mutations bubble an [`UpdateEvent`] from the changed node to the root.
//! Structural kinds drop each ancestor's memoized counts on the way; listeners
//! registered with [`Tree::add_listener`] run synchronously after that.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use gridtree_core::*;
//!
//! let mut tree = Tree::new();
//! let root = tree.root();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! tree.add_listener(root, {
//!     let seen = seen.clone();
//!     move |e: &UpdateEvent| seen.borrow_mut().push(e.kind)
//! })
//! .unwrap();
//!
//! tree.set_item_count(root, 2).unwrap();
//! let item = tree.create_child(root, 0).unwrap();
//! tree.set_texts(item, vec![Some("hello".into())]).unwrap();
//! assert_eq!(*seen.borrow(), [UpdateKind::Add, UpdateKind::Content]);
//! ```

pub mod color;
pub mod config;
pub mod content;
pub mod error;
pub mod event;
pub mod geometry;
pub mod navigation;
pub mod node;
pub mod prelude;
pub mod tree;
pub mod viewport;


pub use color::*;
pub use config::*;
pub use content::*;
pub use error::*;
pub use event::*;
pub use geometry::*;
pub use node::*;
pub use tree::*;
pub use viewport::*;

/// Pixel quantity. Offsets and heights are whole pixels.
pub type Px = i64;
