use contracts::domain::common::AggregateRoot;
use contracts::shared::image::image_data_url;
use leptos::prelude::*;
use thaw::*;

use super::controller::DetailState;
use super::handle::PanelHandle;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;

/// Read-only view of one fetched record
pub fn details_modal<R: AggregateRoot>(panel: PanelHandle<R>) -> impl IntoView {
    let close = Callback::new(move |_| panel.with(|c| c.close_detail()));

    let body = move || {
        let detail = panel.read(|c| c.state().detail.clone());
        match detail {
            None => ().into_any(),
            Some(DetailState::Loading(key)) => view! {
                <Flex gap=FlexGap::Small justify=FlexJustify::Center align=FlexAlign::Center>
                    <Spinner />
                    <span>{format!("Loading {}...", key)}</span>
                </Flex>
            }
            .into_any(),
            Some(DetailState::Ready(record)) => {
                let images = R::descriptor()
                    .image_fields()
                    .filter_map(|spec| {
                        record.image(spec.name).map(|b64| {
                            view! {
                                <figure class="details__image">
                                    <img src=image_data_url(b64) alt=spec.label />
                                    <figcaption>{spec.label}</figcaption>
                                </figure>
                            }
                        })
                    })
                    .collect_view();
                let rows = record
                    .details()
                    .into_iter()
                    .map(|line| {
                        view! {
                            <TableRow>
                                <TableCell>
                                    <strong>{line.label}</strong>
                                </TableCell>
                                <TableCell>{line.value}</TableCell>
                            </TableRow>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="details__images">{images}</div>
                    <Table attr:style="width: 100%;">
                        <TableBody>{rows}</TableBody>
                    </Table>
                }
                .into_any()
            }
        }
    };

    view! {
        <ModalFrame on_close=close modal_class="modal--details">
            <div class="modal-header">
                <h3 class="modal-title">{format!("{} Details", R::element_name())}</h3>
                <button class="modal-close" on:click=move |_| close.run(())>{icon("x")}</button>
            </div>
            <div class="details">{body}</div>
        </ModalFrame>
    }
}
