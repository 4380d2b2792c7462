//! Invitation context test suite.
