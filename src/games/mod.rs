pub mod oanquan;
