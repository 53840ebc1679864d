pub mod cache_proptest;
