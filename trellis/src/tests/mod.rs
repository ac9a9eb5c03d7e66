// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Scenario tests spanning controls, bindings and templates. Single-control
//! behavior is tested next to the control; what lives here needs the whole
//! stack at once.
