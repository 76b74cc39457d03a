use std::sync::Arc;

use tracing::{info, warn};

use doctor_cell::models::Doctor;
use shared_mailer::Mailer;
use slot_cell::models::Slot;

use crate::models::{Appointment, PatientContact};

/// Formats and sends the booking-flow notification mail. All sends are
/// best-effort: failures are logged and swallowed so they can never fail a
/// request.
pub struct NotificationService {
    mailer: Arc<Mailer>,
    backend_url: String,
}

impl NotificationService {
    pub fn new(mailer: Arc<Mailer>, backend_url: String) -> Self {
        Self { mailer, backend_url }
    }

    /// Patient mail only goes to real addresses, never to the sentinel left
    /// by contact-less bookings.
    pub fn should_notify_patient(patient: &PatientContact) -> bool {
        patient.has_contact_email()
    }

    pub fn approve_link(&self, appointment: &Appointment) -> String {
        format!("{}/api/appointments/{}/approve", self.backend_url, appointment.id)
    }

    pub fn reject_link(&self, appointment: &Appointment) -> String {
        format!("{}/api/appointments/{}/reject", self.backend_url, appointment.id)
    }

    pub fn booking_request_body(
        &self,
        doctor: &Doctor,
        appointment: &Appointment,
        slot: &Slot,
    ) -> String {
        format!(
            "New Appointment Booking\n\
             =======================\n\
             \n\
             Doctor: Dr. {doctor_name}\n\
             Specialization: {specialization}\n\
             \n\
             Patient Details:\n\
             Name: {patient_name}\n\
             Email: {patient_email}\n\
             Phone: {patient_phone}\n\
             \n\
             Appointment Details:\n\
             Date: {date}\n\
             Time: {time} ({period})\n\
             Type: {consultation}\n\
             Symptoms: {symptoms}\n\
             \n\
             ACTION REQUIRED:\n\
             ----------------\n\
             To APPROVE this appointment, click here:\n\
             {approve_link}\n\
             \n\
             To REJECT this appointment, click here:\n\
             {reject_link}\n",
            doctor_name = doctor.name,
            specialization = doctor.specialization,
            patient_name = appointment.patient.name,
            patient_email = appointment.patient.email,
            patient_phone = appointment.patient.phone,
            date = slot.date,
            time = slot.time,
            period = slot.period,
            consultation = appointment.consultation_type.label(),
            symptoms = appointment.symptoms.as_deref().unwrap_or("Not specified"),
            approve_link = self.approve_link(appointment),
            reject_link = self.reject_link(appointment),
        )
    }

    /// Notify the doctor (falling back to the hospital's address) that a new
    /// booking awaits approval.
    pub async fn notify_doctor_of_request(
        &self,
        doctor: &Doctor,
        hospital_email: Option<&str>,
        appointment: &Appointment,
        slot: &Slot,
    ) {
        let target = doctor
            .email
            .as_deref()
            .filter(|email| !email.is_empty())
            .or(hospital_email);

        let Some(target) = target else {
            warn!("Could not send email: no address for doctor or hospital");
            return;
        };

        let subject = format!("New Appointment Request: {}", appointment.patient.name);
        let body = self.booking_request_body(doctor, appointment, slot);

        match self.mailer.send(target, &subject, body).await {
            Ok(()) => info!("Notification sent to {}", target),
            Err(e) => warn!("Failed to send notification email: {}", e),
        }
    }

    pub async fn notify_patient_approved(&self, appointment: &Appointment) {
        if !Self::should_notify_patient(&appointment.patient) {
            warn!(
                "No patient email for appointment {}, skipping approval mail",
                appointment.id
            );
            return;
        }

        let body = format!(
            "Dear {},\n\nYour appointment with the doctor has been APPROVED.\n\n\
             Please arrive on time.\n\nThank you,\nSmart Health Team",
            appointment.patient.name
        );

        if let Err(e) = self
            .mailer
            .send(
                &appointment.patient.email,
                "Appointment Approved - Smart Health",
                body,
            )
            .await
        {
            warn!("Failed to send approval email: {}", e);
        }
    }

    pub async fn notify_patient_rejected(&self, appointment: &Appointment) {
        if !Self::should_notify_patient(&appointment.patient) {
            warn!(
                "No patient email for appointment {}, skipping rejection mail",
                appointment.id
            );
            return;
        }

        let body = format!(
            "Dear {},\n\nWe regret to inform you that your appointment request could not \
             be approved at this time.\n\nPlease try booking another slot.\n\n\
             Regards,\nSmart Health Team",
            appointment.patient.name
        );

        if let Err(e) = self
            .mailer
            .send(
                &appointment.patient.email,
                "Appointment Request Declined",
                body,
            )
            .await
        {
            warn!("Failed to send rejection email: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_PROVIDED;

    fn patient(email: &str) -> PatientContact {
        PatientContact {
            name: "Test Patient".to_string(),
            email: email.to_string(),
            phone: NOT_PROVIDED.to_string(),
        }
    }

    #[test]
    fn sentinel_email_suppresses_patient_mail() {
        assert!(!NotificationService::should_notify_patient(&patient(NOT_PROVIDED)));
        assert!(!NotificationService::should_notify_patient(&patient("")));
    }

    #[test]
    fn real_email_allows_patient_mail() {
        assert!(NotificationService::should_notify_patient(&patient(
            "patient@example.com"
        )));
    }
}
