//! The serialize direction of the coercion engine: a typed value graph is
//! walked through [`Reflect`](crate::Reflect) and written straight to the
//! sink, with no intermediate value tree.

mod driver;

pub(crate) use driver::to_writer;
