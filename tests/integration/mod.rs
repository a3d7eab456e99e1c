mod catalog_http_test;
mod common;
mod field_flow_test;
