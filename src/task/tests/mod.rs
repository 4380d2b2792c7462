//! Task context test suite.

mod routing_tests;
