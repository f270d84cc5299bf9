//! Extension traits

mod depot;
mod result;
mod shopper;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use shopper::CUSTOMER_EMAIL_HEADER;
pub(crate) use shopper::RequestShopperExt as _;
