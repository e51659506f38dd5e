// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Pieces shared by the programs embedding the indexer.

pub mod logger;
