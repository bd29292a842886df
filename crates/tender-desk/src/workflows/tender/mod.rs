pub mod bids;
