pub mod scan_types;
