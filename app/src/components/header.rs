use leptos::prelude::*;
use leptos_router::components::A;

pub fn component() -> impl IntoView {
    view! {
        <header class="fixed top-0 right-0 left-0 z-10 py-6 px-4 md:px-6 bg-[#1e1e1e]/80 backdrop-blur-md">
            <div class="container mx-auto max-w-5xl">
                <div class="flex flex-row justify-between items-center text-white">
                    <div class="text-lg font-bold transition-all duration-500 sm:text-2xl hover:text-[#68b5fc]">
                        <A href="/">"dashboard"</A>
                    </div>
                    <div class="text-sm text-gray-400">"cluster overview"</div>
                </div>
            </div>
        </header>
    }
}
