// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the Perch crates. See the `examples/` directory.
