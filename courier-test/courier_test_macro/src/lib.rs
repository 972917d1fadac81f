/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Runs an `async fn` test returning a `Result` on a fresh multi-threaded Tokio runtime.
///
/// Tracing is initialised once per process, the test body runs inside a
/// `courier_test` span, and a panic on the test thread or one of its runtime
/// workers is logged before it propagates, so the failure shows up in the test
/// log file as well. Panics on threads owned by other tests are not counted.
#[proc_macro_attribute]
pub fn courier_test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    if input.sig.asyncness.is_none() {
        return syn::Error::new_spanned(
            input.sig.fn_token,
            "#[courier_test] can only be applied to an async fn",
        )
        .to_compile_error()
        .into();
    }

    let vis = &input.vis;
    let sig = &input.sig;
    let body = &input.block;
    let attrs = &input.attrs;
    let name = &sig.ident;
    let inputs = &sig.inputs;
    let output = &sig.output;

    let async_name = syn::Ident::new(&format!("__{name}_async"), name.span());

    let expanded = quote! {
        #[test]
        #(#attrs)*
        #vis fn #name() {
            use ::courier_test::__private::{tokio, tracing};
            use ::std::sync::Arc;

            ::courier_test::initialize_tracing();

            let panics = ::courier_test::__private::PanicRecord::new(stringify!(#name));
            panics.watch_current_thread();
            let worker_panics = Arc::clone(&panics);

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .on_thread_start(move || worker_panics.watch_current_thread())
                .build()
                .expect("failed to build Tokio runtime for test");

            let span = tracing::info_span!("courier_test", name = stringify!(#name));
            let result = runtime.block_on(tracing::Instrument::instrument(#async_name(), span));

            drop(runtime);

            if let Some(location) = panics.take() {
                panic!("{} panicked in a spawned task at {}", stringify!(#name), location);
            }

            if let Err(err) = result {
                panic!("{} failed: {:?}", stringify!(#name), err);
            }
        }

        async fn #async_name(#inputs) #output #body
    };

    expanded.into()
}
