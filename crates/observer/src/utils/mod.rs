// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod concurrency;

pub use concurrency::run_with_concurrency_ordered;
